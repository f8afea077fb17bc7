//! End-to-end shell sessions driven through `Session::execute`.

use rstest::{fixture, rstest};
use slurmsh_core::{
    BatchScript, Completion, EntryKind, FileContents, JobEvent, JobOutcome, OutputLine,
    SchedulerRequest, Session, ShellConfig,
};

#[fixture]
fn session() -> Session {
    Session::new(ShellConfig::default()).expect("default config seeds")
}

fn run(session: &mut Session, line: &str) -> Vec<String> {
    session
        .execute(line)
        .output
        .iter()
        .map(OutputLine::to_string)
        .collect()
}

#[rstest]
fn test_build_and_tear_down_tree(mut session: Session) {
    assert!(run(&mut session, "mkdir runs runs/a").is_empty());
    assert!(run(&mut session, "touch runs/a/input.txt").is_empty());
    assert!(run(&mut session, "cd runs/a").is_empty());
    assert_eq!(run(&mut session, "pwd"), vec!["/runs/a"]);

    assert_eq!(
        run(&mut session, "rm -r /runs"),
        vec!["rm: cannot remove current working directory"]
    );
    assert!(run(&mut session, "cd").is_empty());
    assert!(run(&mut session, "rm -r runs").is_empty());

    let fs = session.filesystem();
    assert_eq!(fs.file_exists("/runs/a/input.txt"), None);
    assert_eq!(fs.file_exists("/runs"), None);
}

#[rstest]
fn test_copy_then_edit_batch_script(mut session: Session) {
    assert!(run(&mut session, "cp batch.slurm long.slurm").is_empty());

    let result = session.execute("edit long.slurm");
    let edit = result.edit.expect("text file opens in the editor");
    assert!(edit.batch_script);

    let script = BatchScript {
        nodes: 4,
        time_secs: 2 * 3600,
        program: "my_program".to_string(),
    };
    session
        .save_edit(&edit.path, &script.render())
        .expect("copy is writable");

    match session.execute("sbatch long.slurm").scheduler {
        Some(SchedulerRequest::Submit(job)) => {
            assert_eq!(job.num_nodes, 4);
            assert_eq!(job.duration_secs, 7200);
        }
        other => panic!("expected a submission, got {:?}", other),
    }
}

#[rstest]
fn test_sbatch_seeded_script(mut session: Session) {
    match session.execute("sbatch batch.slurm").scheduler {
        Some(SchedulerRequest::Submit(job)) => {
            assert_eq!(job.script, "/batch.slurm");
            assert_eq!(job.num_nodes, 32);
            assert_eq!(job.duration_secs, 36_000);
            assert_eq!(job.program, "my_program");
        }
        other => panic!("expected a submission, got {:?}", other),
    }
}

#[rstest]
fn test_protected_files_survive(mut session: Session) {
    assert_eq!(
        run(&mut session, "rm batch.slurm my_program"),
        vec!["rm: operation not permitted", "rm: operation not permitted"]
    );
    assert_eq!(
        run(&mut session, "cp batch.slurm my_program"),
        vec!["cp: operation not permitted"]
    );
    assert_eq!(
        session.filesystem().file_exists("my_program"),
        Some(EntryKind::BinaryFile)
    );
}

#[rstest]
fn test_history_recall(mut session: Session) {
    run(&mut session, "mkdir d1");
    run(&mut session, "pwd");
    assert_eq!(run(&mut session, "!2"), vec!["/"]);
    assert_eq!(
        run(&mut session, "history"),
        vec![" 1  mkdir d1", " 2  pwd", " 3  pwd", " 4  history"]
    );
    assert_eq!(run(&mut session, "!9"), vec!["event not found"]);
}

#[rstest]
fn test_sleep_and_job_events(mut session: Session) {
    run(&mut session, "sleep 1:00:00");
    assert_eq!(session.clock_ms(), 3_600_000);
    assert_eq!(run(&mut session, "date"), vec!["01/01 01:00:00 UTC"]);

    let event = JobEvent {
        time: session.clock_ms(),
        outcome: JobOutcome::Failed,
        job_name: "standard_job_7".to_string(),
    };
    session.record_job_event(&event).expect("home is writable");
    assert_eq!(
        run(&mut session, "cat job_7.err"),
        vec!["Program killed due to job expiring"]
    );
    assert_eq!(
        run(&mut session, "date -r job_7.err"),
        vec!["01/01 01:00:00 UTC"]
    );

    assert_eq!(session.reset(0), 1);
    assert_eq!(session.filesystem().open_file("job_7.err"), None);
    assert!(matches!(
        session.filesystem().open_file("batch.slurm"),
        Some(FileContents::Text(_))
    ));
}

#[rstest]
#[case("cat b", Completion::Line("cat batch.slurm".to_string()))]
#[case("ls /m", Completion::Line("ls /my_program".to_string()))]
#[case("cd ..", Completion::Line("cd ../".to_string()))]
#[case(
    "ls ",
    Completion::Candidates(vec!["batch.slurm".to_string(), "my_program".to_string()])
)]
fn test_completion(session: Session, #[case] line: &str, #[case] expected: Completion) {
    assert_eq!(session.complete(line), expected);
}

#[rstest]
fn test_completion_into_directories(mut session: Session) {
    run(&mut session, "mkdir results results/run1");
    assert_eq!(
        session.complete("cd re"),
        Completion::Line("cd results/".to_string())
    );
    assert_eq!(
        session.complete("cd results/"),
        Completion::Line("cd results/run1/".to_string())
    );
}

#[test]
fn test_custom_config_seeds_program() {
    let config = ShellConfig::from_toml_str("program_name = \"lu_solver\"\ncluster_nodes = 4\n")
        .expect("valid config");
    let mut session = Session::new(config).expect("seeded");
    assert_eq!(
        run(&mut session, "./lu_solver"),
        vec!["cannot execute programs on the cluster's head node"]
    );
    assert!(run(&mut session, "cat batch.slurm").contains(&"#SBATCH --nodes=4".to_string()));
}
