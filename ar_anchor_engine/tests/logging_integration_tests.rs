//! Integration tests for Engine logging
//!
//! These tests install a capturing logger and check what the engine reports
//! while handling anchors and UI operations.
//!
//! Run with: cargo test --test logging_integration_tests

use ar_anchor_engine::anchor3d::Engine;
use ar_anchor_engine::anchor3d::EngineConfig;
use ar_anchor_engine::anchor3d::assets::{AssetLibrary, ModelAsset};
use ar_anchor_engine::anchor3d::log::{Logger, LogEntry, LogSeverity};
use ar_anchor_engine::anchor3d::scene::Aabb;
use ar_anchor_engine::anchor3d::tracking::{Anchor, AnchorId, LimitedReason, RecordingTracker, TrackingQuality};
use ar_anchor_engine::glam::{Mat4, Vec3};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn engine() -> Engine {
    let assets = AssetLibrary::new()
        .with_model(ModelAsset::new("City", Aabb::from_size(Vec3::new(10.0, 2.0, 10.0))))
        .with_model(ModelAsset::new("Car", Aabb::from_size(Vec3::ONE)));
    Engine::new(EngineConfig::default(), RecordingTracker::new(), assets).unwrap()
}

fn anchor(name: Option<&str>) -> Anchor {
    Anchor::new(AnchorId::new(), name, Mat4::IDENTITY)
}

/// Entries at `severity` whose message contains `needle`
fn count(entries: &Arc<Mutex<Vec<LogEntry>>>, severity: LogSeverity, needle: &str) -> usize {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity && e.message.contains(needle))
        .count()
}

// ============================================================================
// LOGGER API TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[1].file, None);
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Tracking session lost".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("test_file.rs"));
        assert_eq!(captured[0].line, Some(42));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::log(LogSeverity::Info, "test", "captured".to_string());

    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "not captured".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);
}

// ============================================================================
// ENGINE EVENT LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_duplicate_anchor_logged_and_ignored() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut engine = engine();
    let a = anchor(Some("4"));
    engine.on_anchors_added(&[a.clone()]);
    engine.on_anchors_added(&[a]);

    assert_eq!(count(&entries, LogSeverity::Info, "Placed 'City'"), 1);
    assert_eq!(count(&entries, LogSeverity::Debug, "already processed"), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_missing_reference_name_warns() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut engine = engine();
    engine.on_anchors_added(&[anchor(None)]);

    assert_eq!(count(&entries, LogSeverity::Warn, "has no reference object name"), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_lookup_misses_warn() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut engine = engine();
    assert!(!engine.delete_model("Ghost"));
    assert!(!engine.toggle_animation("Ghost"));
    assert!(engine.add_auxiliary_model().is_none());

    assert_eq!(count(&entries, LogSeverity::Warn, "Node not found: Ghost"), 2);
    assert_eq!(count(&entries, LogSeverity::Warn, "Node not found: City"), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_missing_asset_warns() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut engine = engine();
    engine.on_anchors_added(&[anchor(Some("4"))]);
    // The library has no Bee
    assert!(engine.add_auxiliary_model().is_none());

    assert_eq!(count(&entries, LogSeverity::Warn, "Asset not found: Bee"), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_quality_transitions_only() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut engine = engine();
    for _ in 0..3 {
        engine.on_frame_update(TrackingQuality::Limited(LimitedReason::ExcessiveMotion));
    }
    for _ in 0..3 {
        engine.on_frame_update(TrackingQuality::Normal);
    }

    assert_eq!(count(&entries, LogSeverity::Warn, "Tracking quality"), 1);
    assert_eq!(count(&entries, LogSeverity::Info, "Tracking quality"), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_restart_and_lighting_logged() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut engine = engine();
    engine.toggle_lighting();
    engine.restart();

    assert_eq!(count(&entries, LogSeverity::Info, "Lighting switched to Night"), 1);
    assert_eq!(count(&entries, LogSeverity::Info, "Session restarted"), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_refused_start_logs_error_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let tracker = RecordingTracker::new();
    tracker.set_failure(Some("camera permission denied"));
    let result = Engine::new(EngineConfig::default(), tracker, AssetLibrary::new());
    assert!(result.is_err());

    {
        let captured = entries.lock().unwrap();
        let error = captured
            .iter()
            .find(|e| e.severity == LogSeverity::Error)
            .unwrap();
        assert!(error.message.contains("camera permission denied"));
        assert!(error.file.is_some());
        assert!(error.line.is_some());
    }

    Engine::reset_logger();
}
