//! End-to-end tests: scratch files under CARGO_TARGET_TMPDIR, one directory per test.

use crossbeam_channel::bounded;
use minfind::engine::{GlobalMin, Offer, scan_file};
use minfind::pipeline::{
    PendingScan, build_scan_pool, collect_in_order, find_min_with_opts, submit_scans,
};
use minfind::utils::config::ScanConsts;
use minfind::utils::{temp_path_for, write_min_atomic};
use minfind::{FindOpts, Opts, ScanTally, find_min};
use std::fs;
use std::path::{Path, PathBuf};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR"))
        .join("finder_tests")
        .join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read_output(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// --- find_min ---

#[test]
fn test_two_files_example() {
    let dir = scratch_dir("two_files_example");
    let a = write_input(&dir, "a.txt", "3 5 1");
    let b = write_input(&dir, "b.txt", "2 x 7");
    let out = dir.join("out.txt");

    let min = find_min(&[a, b], &out, &FindOpts::default()).unwrap();
    assert_eq!(min, Some(1.0));
    assert_eq!(read_output(&out), "1.0\n");
}

#[test]
fn test_true_minimum_across_many_files() {
    let dir = scratch_dir("many_files");
    let mut inputs = Vec::new();
    for i in 0..24 {
        let body = format!("{} {} {}", 100 + i, 50 - i, (i as f64) * 0.5 - 3.0);
        inputs.push(write_input(&dir, &format!("in{i}.txt"), &body));
    }
    let out = dir.join("out.txt");
    let opts = FindOpts {
        max_workers: Some(3),
        ..FindOpts::default()
    };

    let min = find_min(&inputs, &out, &opts).unwrap();
    assert_eq!(min, Some(-3.0));
    let written: f64 = read_output(&out).trim().parse().unwrap();
    assert_eq!(written, -3.0);
}

#[test]
fn test_junk_tokens_do_not_change_result() {
    let dir = scratch_dir("junk_tokens");
    let clean = vec![
        write_input(&dir, "c1.txt", "4 9 2.5"),
        write_input(&dir, "c2.txt", "8 3"),
    ];
    let noisy = vec![
        write_input(&dir, "n1.txt", "alpha 4 9 -- 2.5 beta"),
        write_input(&dir, "n2.txt", "8 ,, 3 z0"),
    ];
    let out_clean = dir.join("clean.txt");
    let out_noisy = dir.join("noisy.txt");

    let a = find_min(&clean, &out_clean, &FindOpts::default()).unwrap();
    let b = find_min(&noisy, &out_noisy, &FindOpts::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(read_output(&out_clean), read_output(&out_noisy));
}

#[test]
fn test_unreadable_first_file_does_not_block_others() {
    let dir = scratch_dir("unreadable_first");
    let missing = dir.join("does_not_exist.txt");
    let a = write_input(&dir, "a.txt", "4 2 6");
    let b = write_input(&dir, "b.txt", "5");
    let out = dir.join("out.txt");

    let min = find_min(&[missing, a, b], &out, &FindOpts::default()).unwrap();
    assert_eq!(min, Some(2.0));
    assert_eq!(read_output(&out), "2.0\n");
}

#[test]
fn test_unreadable_middle_file_skipped() {
    let dir = scratch_dir("unreadable_middle");
    let a = write_input(&dir, "a.txt", "7");
    let b = write_input(&dir, "b.txt", "-1");
    let out = dir.join("out.txt");

    let min = find_min(&[a, dir.join("gone.txt"), b], &out, &FindOpts::default()).unwrap();
    assert_eq!(min, Some(-1.0));
}

#[test]
fn test_all_unreadable_leaves_output_absent() {
    let dir = scratch_dir("all_unreadable");
    let out = dir.join("out.txt");

    let min = find_min(
        &[dir.join("x.txt"), dir.join("y.txt")],
        &out,
        &FindOpts::default(),
    )
    .unwrap();
    assert_eq!(min, None);
    assert!(!out.exists());
}

/// A lone empty file yields +inf, and that is what gets written.
#[test]
fn test_single_empty_file_writes_infinity() {
    let dir = scratch_dir("single_empty");
    let empty = write_input(&dir, "empty.txt", "");
    let out = dir.join("out.txt");

    let min = find_min(&[empty], &out, &FindOpts::default()).unwrap();
    assert_eq!(min, Some(f64::INFINITY));
    assert_eq!(read_output(&out), "inf\n");
}

#[test]
fn test_empty_file_loses_to_any_number() {
    let dir = scratch_dir("empty_and_number");
    let empty = write_input(&dir, "empty.txt", "words only");
    let a = write_input(&dir, "a.txt", "1e6");
    let out = dir.join("out.txt");

    let min = find_min(&[empty, a], &out, &FindOpts::default()).unwrap();
    assert_eq!(min, Some(1e6));
    assert_eq!(read_output(&out), "1000000.0\n");
}

#[test]
fn test_no_inputs_is_none() {
    let dir = scratch_dir("no_inputs");
    let out = dir.join("out.txt");
    assert_eq!(find_min(&[], &out, &FindOpts::default()).unwrap(), None);
    assert!(!out.exists());
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = scratch_dir("overwrite");
    let out = write_input(&dir, "out.txt", "stale contents\nsecond line\n");
    let a = write_input(&dir, "a.txt", "12 11");

    find_min(&[a], &out, &FindOpts::default()).unwrap();
    assert_eq!(read_output(&out), "11.0\n");
    assert!(!temp_path_for(&out).exists());
}

#[test]
fn test_failed_rename_removes_temp_file() {
    let dir = scratch_dir("rename_fails");
    // Renaming a file over an existing directory fails.
    let out = dir.join("out");
    fs::create_dir(&out).unwrap();

    assert!(write_min_atomic(&out, 4.0).is_err());
    assert!(!temp_path_for(&out).exists());

    let a = write_input(&dir, "a.txt", "9 4");
    let min = find_min(&[a], &out, &FindOpts::default()).unwrap();
    assert_eq!(min, Some(4.0));
    assert!(out.is_dir());
    assert!(!temp_path_for(&out).exists());
}

#[test]
fn test_tally_reports_unwritable_output() {
    let dir = scratch_dir("tally_unwritable");
    let a = write_input(&dir, "a.txt", "5 3");
    let b = write_input(&dir, "b.txt", "1");
    let out = dir.join("missing_dir").join("out.txt");

    let (min, tally) = find_min_with_opts(&[a, b], &out, &Opts::default()).unwrap();
    assert_eq!(min, Some(1.0));
    assert_eq!(tally.improved, 2);
    assert_eq!(tally.unpersisted, 2);
    assert!(!tally.output_current);
    assert!(!out.exists());
}

#[test]
fn test_tally_output_current_after_writes() {
    let dir = scratch_dir("tally_written");
    let a = write_input(&dir, "a.txt", "2");
    let out = dir.join("out.txt");

    let (min, tally) = find_min_with_opts(&[a], &out, &Opts::default()).unwrap();
    assert_eq!(min, Some(2.0));
    assert_eq!(tally.unpersisted, 0);
    assert!(tally.output_current);
    assert_eq!(tally.lost(), 0);
}

// --- scan_file ---

#[test]
fn test_scan_file_missing_is_error() {
    let dir = scratch_dir("scan_missing");
    assert!(scan_file(&dir.join("nope.txt"), ScanConsts::MMAP_THRESHOLD).is_err());
}

#[test]
fn test_scan_file_mmap_and_buffered_agree() {
    let dir = scratch_dir("scan_mmap");
    let path = write_input(&dir, "data.txt", "9 -3.5 x 8\n0.75 junk\n");

    let mapped = scan_file(&path, 0).unwrap();
    let buffered = scan_file(&path, ScanConsts::MMAP_THRESHOLD).unwrap();
    assert_eq!(mapped, buffered);
    assert_eq!(mapped.min, -3.5);
    assert_eq!(mapped.numbers, 4);
    assert_eq!(mapped.skipped, 2);
}

#[test]
fn test_scan_file_token_across_read_chunks() {
    let dir = scratch_dir("scan_chunks");
    let mut body = " ".repeat(ScanConsts::READ_CHUNK_SIZE - 2);
    body.push_str("-42 9");
    let path = write_input(&dir, "wide.txt", &body);

    let scan = scan_file(&path, ScanConsts::MMAP_THRESHOLD).unwrap();
    assert_eq!(scan.min, -42.0);
    assert_eq!(scan.numbers, 2);
}

#[test]
fn test_scan_file_unicode_space_across_read_chunks() {
    let dir = scratch_dir("scan_unicode_chunks");
    // U+3000 is three bytes; place it so the read boundary falls inside it.
    let mut body = " ".repeat(ScanConsts::READ_CHUNK_SIZE - 3);
    body.push_str("7\u{3000}-2");
    let path = write_input(&dir, "wide.txt", &body);

    let buffered = scan_file(&path, ScanConsts::MMAP_THRESHOLD).unwrap();
    let mapped = scan_file(&path, 0).unwrap();
    assert_eq!(buffered, mapped);
    assert_eq!(buffered.min, -2.0);
    assert_eq!(buffered.numbers, 2);
}

// --- GlobalMin ---

#[test]
fn test_register_first_value_always_stored() {
    let dir = scratch_dir("register_first");
    let out = dir.join("out.txt");
    let reg = GlobalMin::new(&out);

    assert_eq!(reg.current(), None);
    assert_eq!(
        reg.offer(1e9),
        Offer::Improved {
            value: 1e9,
            persisted: true
        }
    );
    assert_eq!(reg.current(), Some(1e9));
}

#[test]
fn test_register_only_moves_down() {
    let dir = scratch_dir("register_monotonic");
    let out = dir.join("out.txt");
    let reg = GlobalMin::new(&out);

    reg.offer(5.0);
    assert_eq!(reg.offer(5.0), Offer::NotLower);
    assert_eq!(reg.offer(6.0), Offer::NotLower);
    assert!(matches!(reg.offer(3.0), Offer::Improved { value, .. } if value == 3.0));
    assert_eq!(read_output(&out), "3.0\n");
    assert_eq!(reg.into_inner(), Some(3.0));
}

#[test]
fn test_register_ignores_sentinel_even_when_unset() {
    let dir = scratch_dir("register_sentinel");
    let out = dir.join("out.txt");
    let reg = GlobalMin::new(&out);

    assert_eq!(reg.offer(minfind::FAILED_SCAN), Offer::Sentinel);
    assert_eq!(reg.current(), None);
    assert!(!out.exists());

    reg.offer(4.0);
    assert_eq!(reg.offer(f64::NAN), Offer::Sentinel);
    assert_eq!(reg.current(), Some(4.0));
}

#[test]
fn test_register_write_failure_still_advances() {
    let dir = scratch_dir("register_write_fail");
    let out = dir.join("no_such_dir").join("out.txt");
    let reg = GlobalMin::new(&out);

    assert_eq!(
        reg.offer(2.0),
        Offer::Improved {
            value: 2.0,
            persisted: false
        }
    );
    assert_eq!(reg.current(), Some(2.0));
    assert_eq!(reg.offer(3.0), Offer::NotLower);
}

// --- collect_in_order ---

#[test]
fn test_collect_counts_failures_and_drops() {
    let dir = scratch_dir("collect_tally");
    let a = write_input(&dir, "a.txt", "3");
    let b = write_input(&dir, "b.txt", "1");
    let out = dir.join("out.txt");
    let inputs = vec![a, dir.join("missing.txt"), b];

    let pool = build_scan_pool(2).unwrap();
    let mut pending = submit_scans(&pool, &inputs, ScanConsts::MMAP_THRESHOLD);

    // A unit whose sender went away without a result, as after a panicking scan.
    let (tx, rx) = bounded::<f64>(1);
    drop(tx);
    pending.push(PendingScan {
        path: dir.join("panicked.txt"),
        result_rx: rx,
    });

    let reg = GlobalMin::new(&out);
    let tally = collect_in_order(pending, &reg, false);
    assert_eq!(
        tally,
        ScanTally {
            inputs: 4,
            improved: 2,
            failed: 1,
            dropped: 1,
            unpersisted: 0,
            output_current: true,
        }
    );
    assert_eq!(reg.current(), Some(1.0));
    assert_eq!(read_output(&out), "1.0\n");
}

#[test]
fn test_collect_survives_panicking_unit() {
    let dir = scratch_dir("collect_panic");
    let a = write_input(&dir, "a.txt", "8 6");
    let out = dir.join("out.txt");

    let pool = build_scan_pool(2).unwrap();
    let mut pending = submit_scans(&pool, &[a], ScanConsts::MMAP_THRESHOLD);
    let (tx, rx) = bounded::<f64>(1);
    pool.spawn(move || {
        let _keep = tx;
        panic!("scan blew up");
    });
    pending.insert(
        0,
        PendingScan {
            path: dir.join("boom.txt"),
            result_rx: rx,
        },
    );

    let reg = GlobalMin::new(&out);
    let tally = collect_in_order(pending, &reg, false);
    assert_eq!(tally.dropped, 1);
    assert_eq!(reg.into_inner(), Some(6.0));
}
