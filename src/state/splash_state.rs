//! Splash screen progress state

use std::time::{Duration, Instant};

/// Phase of the splash screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    /// Progress bar filling up
    Loading,
    /// Ready to hand over to login
    Complete,
}

/// Splash screen state
#[derive(Debug)]
pub struct SplashState {
    /// When the splash started
    pub start_time: Instant,
    pub phase: SplashPhase,
    /// Eased progress, 0.0 to 1.0
    pub progress: f32,
}

impl SplashState {
    /// Total time the splash stays up
    const DURATION: Duration = Duration::from_millis(3000);

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase: SplashPhase::Loading,
            progress: 0.0,
        }
    }

    /// Update progress based on elapsed time
    pub fn update(&mut self) {
        if self.is_complete() {
            return;
        }
        self.update_at(self.start_time.elapsed());
    }

    fn update_at(&mut self, elapsed: Duration) {
        if elapsed >= Self::DURATION {
            self.progress = 1.0;
            self.phase = SplashPhase::Complete;
            return;
        }
        let linear = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        // Ease out so the bar slows down near the end
        self.progress = simple_easing::cubic_out(linear);
        self.phase = SplashPhase::Loading;
    }

    /// Skip to completion (user pressed a key)
    pub fn skip(&mut self) {
        self.progress = 1.0;
        self.phase = SplashPhase::Complete;
    }

    /// Check if the splash is done
    pub fn is_complete(&self) -> bool {
        self.phase == SplashPhase::Complete
    }

    /// Progress as a whole percentage
    pub fn percent(&self) -> u16 {
        (self.progress.clamp(0.0, 1.0) * 100.0).round() as u16
    }
}

impl Default for SplashState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_loading() {
        let state = SplashState::new();
        assert_eq!(state.phase, SplashPhase::Loading);
        assert_eq!(state.progress, 0.0);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_update_immediately_stays_loading() {
        let mut state = SplashState::new();
        state.update();
        assert_eq!(state.phase, SplashPhase::Loading);
        assert!(state.progress < 0.5);
    }

    #[test]
    fn test_progress_is_eased() {
        let mut state = SplashState::new();
        state.update_at(Duration::from_millis(1500));
        // cubic ease-out is ahead of linear at the midpoint
        assert!(state.progress > 0.5);
        assert!(state.progress < 1.0);
    }

    #[test]
    fn test_completes_after_duration() {
        let mut state = SplashState::new();
        state.update_at(Duration::from_millis(3000));
        assert!(state.is_complete());
        assert_eq!(state.percent(), 100);
    }

    #[test]
    fn test_skip_completes() {
        let mut state = SplashState::new();
        state.skip();
        // A later tick must not rewind a skipped splash
        state.update();
        assert!(state.is_complete());
        assert_eq!(state.percent(), 100);
    }
}
