//! Integration tests for recording and reloading runs.

use retina_frames::{
    read_frames, ArenaHeader, FrameLogger, FrameRecord, PoseSnapshot, RetinaSnapshot,
};
use std::fs;
use tempfile::tempdir;

fn sample_header() -> ArenaHeader {
    ArenaHeader {
        num_walls: 4,
        wall_dist: 5.0,
        wall_height: 1.0,
        vertices: vec![[1.0, -1.0], [1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]],
        retina_width: 3,
        retina_height: 2,
    }
}

fn sample_frame(step: u64) -> FrameRecord {
    FrameRecord {
        step,
        pose: PoseSnapshot {
            x: 0.1 * step as f64,
            y: 0.0,
            direction: 0.25,
        },
        accepted: step % 2 == 0,
        retina: RetinaSnapshot::from_pixels(3, 2, &[0, 1, 0, 1, 0, 1]),
    }
}

#[test]
fn test_logged_run_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.jsonl");

    {
        let mut logger = FrameLogger::new(&path).unwrap();
        logger.log_header(&sample_header()).unwrap();
        for step in 0..5 {
            logger.log(&sample_frame(step)).unwrap();
        }
        assert_eq!(logger.frame_count(), 5);
    }

    let run = read_frames(&path).unwrap();
    assert_eq!(run.header, Some(sample_header()));
    assert_eq!(run.frames.len(), 5);
    assert_eq!(run.frames[3], sample_frame(3));
    assert!(!run.frames[1].accepted);
}

#[test]
fn test_one_line_per_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.jsonl");

    {
        let mut logger = FrameLogger::new(&path).unwrap();
        logger.log_header(&sample_header()).unwrap();
        logger.log(&sample_frame(0)).unwrap();
        logger.log(&sample_frame(1)).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.lines().next().unwrap().contains(r#""kind":"arena""#));
}

#[test]
fn test_reader_rejects_garbage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.jsonl");
    fs::write(&path, "not json\n").unwrap();

    assert!(read_frames(&path).is_err());
}
