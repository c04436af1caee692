//! Frame loop and calibration driver

use std::future::Future;
use std::time::Duration;

use calibration::{CalibrationPlan, CalibrationRun};
use geometry::ScreenPoint;
use landmarks::{wait_until_ready, LandmarkSource, ReplaySource, SimulatedConfig, SimulatedSource};
use serde::Serialize;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use tracker::{GazeTracker, TrackingMode};

use crate::settings::{AppConfig, SourceKind};
use crate::AppError;

/// Processed frames between status lines
const STATUS_EVERY_FRAMES: u64 = 300;

/// What a session did, reported when it ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub frames_failed: u64,
    pub clicks: u64,
    pub calibration_samples: usize,
    pub mode: TrackingMode,
    pub cursor: ScreenPoint,
    /// Frame rate from the last two frame timestamps
    pub fps: f64,
}

/// Build the configured landmark source
///
/// A simulated face is generated with the tracker's landmark layout and
/// timestamped at the frame pull interval.
pub fn open_source(config: &AppConfig) -> Result<Box<dyn LandmarkSource>, AppError> {
    let source = &config.source;
    match source.kind {
        SourceKind::Simulated => {
            let simulated = SimulatedConfig {
                frame_interval_ms: config.frame_interval_ms as f64,
                ..source.simulated.clone()
            };
            Ok(Box::new(
                SimulatedSource::new(simulated).with_layout(config.tracker.layout.clone()),
            ))
        }
        SourceKind::Replay => {
            let path = source
                .path
                .as_ref()
                .ok_or_else(|| AppError::Invalid("source.path is required for replay".into()))?;
            Ok(Box::new(ReplaySource::open(path)?))
        }
    }
}

/// Run a session until end of stream or Ctrl-C
pub async fn run(config: &AppConfig) -> Result<SessionSummary, AppError> {
    let mut source = open_source(config)?;
    let result = run_with_source(source.as_mut(), config, shutdown_signal()).await;
    source.close();
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Run a session on `source` until end of stream or `shutdown` resolves
///
/// The caller owns the source and closes it.
pub async fn run_with_source<F>(
    source: &mut dyn LandmarkSource,
    config: &AppConfig,
    shutdown: F,
) -> Result<SessionSummary, AppError>
where
    F: Future<Output = ()>,
{
    if let Err(e) = wait_until_ready(&*source, &config.readiness).await {
        error!("Landmark source '{}' unavailable: {}", source.name(), e);
        return Err(e.into());
    }

    let mut tracker = GazeTracker::new(config.tracker.clone())?;
    let mut calibration = CalibrationDriver::begin(&mut tracker, config);
    let mut clicks = 0u64;

    let mut ticker = time::interval(config.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let first_dwell = calibration.as_ref().map_or(Duration::ZERO, CalibrationDriver::dwell);
    let deadline = time::sleep(first_dwell);
    tokio::pin!(deadline);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            _ = &mut deadline, if calibration.is_some() => {
                let finished = calibration
                    .as_mut()
                    .map_or(true, |driver| driver.capture(&mut tracker));
                if finished {
                    calibration = None;
                } else if let Some(driver) = calibration.as_ref() {
                    deadline.as_mut().reset(Instant::now() + driver.dwell());
                }
            }
            _ = ticker.tick() => {
                let frame = match source.next_frame() {
                    Ok(Some(frame)) => Ok(frame),
                    Ok(None) => {
                        info!("Landmark source '{}' reached end of stream", source.name());
                        break;
                    }
                    Err(e) => Err(e),
                };

                match tracker.handle_frame(frame) {
                    Ok(outcome) => {
                        if outcome.is_click() {
                            clicks += 1;
                            info!("Click at ({:.0}, {:.0})", outcome.cursor.x, outcome.cursor.y);
                        }
                        if config.print_outcomes {
                            println!("{}", serde_json::to_string(&outcome)?);
                        }
                        let processed = tracker.state().frames_processed;
                        if processed % STATUS_EVERY_FRAMES == 0 {
                            info!(
                                "Status: mode={:?}, cursor=({:.0}, {:.0}), fps={}, failed={}",
                                outcome.mode,
                                outcome.cursor.x,
                                outcome.cursor.y,
                                outcome.fps,
                                tracker.state().frames_failed
                            );
                        }
                    }
                    Err(e) => warn!("Skipping frame: {}", e),
                }
            }
        }
    }

    Ok(SessionSummary {
        frames_processed: tracker.state().frames_processed,
        frames_failed: tracker.state().frames_failed,
        clicks,
        calibration_samples: tracker.calibration().len(),
        mode: tracker.mode(),
        cursor: tracker.current_cursor_position(),
        fps: tracker.state().fps,
    })
}

/// Walks the calibration targets, capturing one sample at the end of each dwell
struct CalibrationDriver {
    run: CalibrationRun,
}

impl CalibrationDriver {
    /// Start calibrating; `None` if the plan is empty and tracking started directly
    fn begin(tracker: &mut GazeTracker, config: &AppConfig) -> Option<Self> {
        tracker.start_calibration();
        let run = CalibrationPlan::new(&config.calibration, tracker.config().screen).start();
        if run.is_finished() {
            tracker.finalize_calibration();
            return None;
        }

        let driver = Self { run };
        driver.announce();
        Some(driver)
    }

    fn dwell(&self) -> Duration {
        self.run.current().map_or(Duration::ZERO, |step| step.dwell())
    }

    fn announce(&self) {
        if let Some(step) = self.run.current() {
            info!(
                "Look at calibration target {}/{} at ({:.0}, {:.0})",
                step.index + 1,
                step.index + self.run.remaining(),
                step.target.x,
                step.target.y
            );
        }
    }

    /// Capture the current target and move on; true once calibration is done
    fn capture(&mut self, tracker: &mut GazeTracker) -> bool {
        if let Some(step) = self.run.current() {
            if let Some(sample) = tracker.capture_calibration_point(step.target) {
                debug!(
                    "Captured target {} with face point ({:.4}, {:.4})",
                    step.index,
                    sample.face_point().x,
                    sample.face_point().y
                );
            }
        }

        if self.run.advance().is_some() {
            self.announce();
            false
        } else {
            tracker.finalize_calibration();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calibration::{CalibrationConfig, CalibrationGrid, DwellTiming};
    use crate::settings::SourceConfig;
    use landmarks::{LandmarkError, LandmarkLayout, ReadinessPolicy};

    fn quick_config(frames: u64) -> AppConfig {
        AppConfig {
            calibration: CalibrationConfig {
                grid: CalibrationGrid::from_axis_fractions(&[0.1, 0.9], &[0.1, 0.9]),
                timing: DwellTiming {
                    first_settle_ms: 100,
                    settle_ms: 50,
                    capture_ms: 50,
                },
            },
            source: SourceConfig {
                simulated: SimulatedConfig {
                    frames: Some(frames),
                    blink_period_frames: 40,
                    blink_frames: 2,
                    ..Default::default()
                },
                ..Default::default()
            },
            frame_interval_ms: 10,
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_calibrates_then_tracks() {
        let config = quick_config(100);
        let mut source = open_source(&config).unwrap();
        let summary = run_with_source(source.as_mut(), &config, std::future::pending())
            .await
            .unwrap();
        source.close();

        assert_eq!(summary.frames_processed, 100);
        assert_eq!(summary.frames_failed, 0);
        assert_eq!(summary.calibration_samples, 4);
        assert_eq!(summary.mode, TrackingMode::Running);
        // Pulled every 10 ms
        assert_eq!(summary.fps, 100.0);
        // Blink at frame 38 falls inside calibration, frame 78 is a click
        assert_eq!(summary.clicks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_frames_are_skipped() {
        let mut config = quick_config(50);
        config.source.simulated.failure_every = Some(5);
        let mut source = open_source(&config).unwrap();
        let summary = run_with_source(source.as_mut(), &config, std::future::pending())
            .await
            .unwrap();

        assert_eq!(summary.frames_failed, 10);
        assert_eq!(summary.frames_processed, 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_source_is_terminal() {
        let mut config = quick_config(10);
        config.source.simulated.load_delay_polls = 100;
        config.readiness = ReadinessPolicy {
            attempts: 3,
            interval_ms: 100,
        };
        let mut source = open_source(&config).unwrap();
        let result = run_with_source(source.as_mut(), &config, std::future::pending()).await;

        assert!(matches!(
            result,
            Err(AppError::Source(LandmarkError::Unavailable { attempts: 3 }))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_open_ended_source() {
        let mut config = quick_config(0);
        config.source.simulated.frames = None;
        let mut source = open_source(&config).unwrap();
        let shutdown = time::sleep(Duration::from_millis(55));
        let summary = run_with_source(source.as_mut(), &config, shutdown).await.unwrap();

        assert!((5..=7).contains(&summary.frames_processed));
        assert_eq!(summary.mode, TrackingMode::Calibrating);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_grid_starts_tracking() {
        let mut config = quick_config(5);
        config.calibration.grid = CalibrationGrid { targets: Vec::new() };
        let mut source = open_source(&config).unwrap();
        let summary = run_with_source(source.as_mut(), &config, std::future::pending())
            .await
            .unwrap();

        assert_eq!(summary.mode, TrackingMode::Running);
        assert_eq!(summary.calibration_samples, 0);
        assert_eq!(summary.cursor, config.tracker.screen.center());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_layout_reaches_simulated_source() {
        let mut config = quick_config(100);
        config.tracker.layout = LandmarkLayout {
            left_iris: 470,
            right_iris: 475,
            ..LandmarkLayout::face_mesh()
        };
        let mut source = open_source(&config).unwrap();
        let summary = run_with_source(source.as_mut(), &config, std::future::pending())
            .await
            .unwrap();

        assert_eq!(summary.calibration_samples, 4);
        assert_eq!(summary.mode, TrackingMode::Running);
    }

    #[test]
    fn test_simulated_timestamps_follow_pull_interval() {
        let config = quick_config(3);
        let mut source = open_source(&config).unwrap();
        let first = source.next_frame().unwrap().unwrap();
        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.timestamp_ms - first.timestamp_ms, 10.0);
    }

    #[test]
    fn test_replay_without_path_is_rejected() {
        let config = AppConfig {
            source: SourceConfig {
                kind: SourceKind::Replay,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(open_source(&config), Err(AppError::Invalid(_))));
    }

    #[test]
    fn test_missing_recording_is_io_error() {
        let config = AppConfig {
            source: SourceConfig {
                kind: SourceKind::Replay,
                path: Some("/nonexistent/session.jsonl".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            open_source(&config),
            Err(AppError::Source(LandmarkError::Io(_)))
        ));
    }
}
