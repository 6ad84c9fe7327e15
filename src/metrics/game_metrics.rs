use std::time::Duration;
use tokio::time::Instant;

/// Per-session statistics; nothing here outlives the process
///
/// The clock reads `tokio::time::Instant`, so it follows the runtime's clock
/// (including a paused one in tests) rather than the wall clock.
#[derive(Debug)]
pub struct GameMetrics {
    started_at: Instant,
    /// Duration of the last game, fixed once it ends
    finished_after: Option<Duration>,
    pub best_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            finished_after: None,
            best_score: 0,
            games_played: 0,
        }
    }

    /// Time spent in the current game; stops counting once it ends
    pub fn elapsed(&self) -> Duration {
        self.finished_after
            .unwrap_or_else(|| self.started_at.elapsed())
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Instant::now();
        self.finished_after = None;
    }

    /// Record a finished or abandoned game
    pub fn on_game_over(&mut self, final_score: u32) {
        if self.finished_after.is_some() {
            return;
        }
        self.finished_after = Some(self.started_at.elapsed());
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    /// Elapsed time as `mm:ss`
    pub fn clock(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_clock_follows_runtime_time() {
        let metrics = GameMetrics::new();
        advance(Duration::from_secs(125)).await;

        assert_eq!(metrics.elapsed(), Duration::from_secs(125));
        assert_eq!(metrics.clock(), "02:05");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_stops_at_game_over() {
        let mut metrics = GameMetrics::new();
        advance(Duration::from_secs(3)).await;
        metrics.on_game_over(20);

        advance(Duration::from_secs(10)).await;
        assert_eq!(metrics.elapsed(), Duration::from_secs(3));

        metrics.on_game_start();
        advance(Duration::from_secs(1)).await;
        assert_eq!(metrics.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_best_score_and_game_count() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(30);
        // A second report for the same game is ignored.
        metrics.on_game_over(40);
        assert_eq!(metrics.best_score, 30);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_start();
        metrics.on_game_over(10);
        assert_eq!(metrics.best_score, 30);
        assert_eq!(metrics.games_played, 2);
    }
}
