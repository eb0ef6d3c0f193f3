#![allow(non_snake_case)]

use super::*;
use dto2ts_core::{ClassDecl, ClassGraph, FieldDecl, GeneratorConfig, TypeRef};
use std::sync::mpsc;

fn small_pool(workers: usize, capacity: usize) -> GenerationPool {
    GenerationPool::new(
        PoolConfig::new()
            .with_worker_threads(workers)
            .with_queue_capacity(capacity),
    )
    .expect("pool should start")
}

// ============================================================================
// PoolConfig tests
// ============================================================================

#[test]
fn PoolConfig___default___has_expected_values() {
    let config = PoolConfig::default();

    assert!(config.worker_threads.is_none());
    assert_eq!(config.queue_capacity, 100);
    assert_eq!(config.thread_name, "dto2ts-worker");
}

#[test]
fn PoolConfig___builder___sets_values() {
    let config = PoolConfig::new()
        .with_worker_threads(2)
        .with_queue_capacity(8)
        .with_thread_name("custom");

    assert_eq!(config.worker_threads, Some(2));
    assert_eq!(config.queue_capacity, 8);
    assert_eq!(config.thread_name, "custom");
}

#[test]
fn PoolConfig___effective_workers___defaults_to_at_least_four() {
    assert!(PoolConfig::default().effective_workers() >= 4);
}

#[test]
fn PoolConfig___effective_workers___zero_becomes_one() {
    assert_eq!(PoolConfig::new().with_worker_threads(0).effective_workers(), 1);
}

#[test]
fn PoolConfig___deserialize___missing_fields_use_defaults() {
    let config: PoolConfig = serde_json::from_str(r#"{"queue_capacity": 5}"#).unwrap();

    assert_eq!(config.queue_capacity, 5);
    assert!(config.worker_threads.is_none());
    assert_eq!(config.thread_name, "dto2ts-worker");
}

// ============================================================================
// GenerationPool tests
// ============================================================================

#[test]
fn GenerationPool___execute___returns_job_result() {
    let pool = small_pool(2, 4);

    let result = pool.execute(|| Ok(21 * 2));

    assert_eq!(result.unwrap(), 42);
}

#[test]
fn GenerationPool___execute___propagates_job_error() {
    let pool = small_pool(2, 4);

    let result: GenerateResult<()> =
        pool.execute(|| Err(GenerateError::RootNotFound("a.B".to_string())));

    assert!(matches!(result, Err(GenerateError::RootNotFound(_))));
}

#[test]
fn GenerationPool___run_all___preserves_submission_order() {
    let pool = small_pool(4, 16);
    let jobs: Vec<_> = (0..20)
        .map(|i| {
            move || {
                std::thread::sleep(Duration::from_millis((20 - i) as u64));
                Ok(i)
            }
        })
        .collect();

    let results: Vec<i32> = pool
        .run_all(jobs)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(results, (0..20).collect::<Vec<_>>());
}

#[test]
fn GenerationPool___submit_when_saturated___runs_on_caller() {
    let pool = small_pool(1, 0);
    let (release, wait) = mpsc::channel::<()>();

    let blocked = pool
        .submit(move || {
            wait.recv().ok();
            Ok(std::thread::current().id())
        })
        .unwrap();
    let inline = pool
        .submit(|| Ok(std::thread::current().id()))
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(inline, std::thread::current().id());
    assert_eq!(pool.caller_runs_count(), 1);

    release.send(()).unwrap();
    assert_ne!(blocked.join().unwrap(), std::thread::current().id());
}

#[test]
fn GenerationPool___panicking_job___reports_task_failed() {
    let pool = small_pool(1, 1);

    let result: GenerateResult<()> = pool.execute(|| panic!("boom"));

    assert!(matches!(result, Err(GenerateError::TaskFailed(_))));
}

#[test]
fn GenerationPool___panicking_job_on_caller___reports_task_failed() {
    let pool = small_pool(1, 0);
    let (release, wait) = mpsc::channel::<()>();

    let blocked = pool
        .submit(move || {
            wait.recv().ok();
            Ok(())
        })
        .unwrap();
    let inline: GenerateResult<()> = pool.submit(|| panic!("boom")).unwrap().join();

    assert!(matches!(inline, Err(GenerateError::TaskFailed(_))));
    assert_eq!(pool.caller_runs_count(), 1);

    release.send(()).unwrap();
    assert!(blocked.join().is_ok());
}

#[test]
fn GenerationPool___oversized_queue_capacity___starts_and_runs_jobs() {
    let pool = small_pool(2, usize::MAX);

    assert_eq!(pool.execute(|| Ok("done")).unwrap(), "done");
    pool.shutdown(Duration::from_secs(1)).unwrap();
}

#[test]
fn GenerationPool___shutdown___rejects_new_work() {
    let pool = small_pool(1, 1);

    pool.shutdown(Duration::from_secs(1)).unwrap();

    assert!(pool.is_shutting_down());
    assert!(matches!(
        pool.execute(|| Ok(())),
        Err(GenerateError::PoolShutdown)
    ));
}

#[test]
fn GenerationPool___shutdown___skips_jobs_still_waiting() {
    let pool = small_pool(1, 1);
    let (release, wait) = mpsc::channel::<()>();

    let running = pool
        .submit(move || {
            wait.recv().ok();
            Ok("ran")
        })
        .unwrap();
    let waiting = pool.submit(|| Ok("ran")).unwrap();

    pool.shutdown(Duration::from_millis(50)).unwrap();
    release.send(()).unwrap();

    assert_eq!(running.join().unwrap(), "ran");
    assert!(matches!(waiting.join(), Err(GenerateError::PoolShutdown)));
}

#[test]
fn GenerationPool___shutdown_signal___observes_shutdown() {
    let pool = small_pool(1, 1);
    let signal = pool.shutdown_signal();

    pool.shutdown(Duration::from_millis(10)).unwrap();

    assert!(signal.is_triggered());
}

#[test]
fn GenerationPool___generate_all___one_document_per_root() {
    let graph = ClassGraph::new()
        .with_project(
            ClassDecl::class("com.acme.UserRequest")
                .with_field(FieldDecl::new("id", TypeRef::primitive("long"))),
        )
        .with_project(
            ClassDecl::class("com.acme.UserResponse")
                .with_field(FieldDecl::new("name", TypeRef::class("java.lang.String"))),
        );
    let generator = Arc::new(TypescriptGenerator::new(
        Arc::new(graph),
        GeneratorConfig::default(),
    ));
    let pool = small_pool(2, 2);

    let results = pool.generate_all(
        &generator,
        &["com.acme.UserRequest", "com.acme.Missing", "com.acme.UserResponse"],
    );

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap().content,
        "export interface UserRequest {\n  id: number;\n}\n"
    );
    assert!(matches!(results[1], Err(GenerateError::RootNotFound(_))));
    assert_eq!(results[2].as_ref().unwrap().root_name, "UserResponse");
}
