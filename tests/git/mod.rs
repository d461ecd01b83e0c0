use freeze_version::git::{get_git_devstr, Git, Kind, Probe};
use log::Level;

use crate::{head_id, repos, Result};

#[test]
fn count_mode_counts_commits_reachable_from_head() -> Result {
    let repo = repos()?.join("three-commits");
    assert_eq!(get_git_devstr(false, true, Some(repo.as_path()))?, "-r3");
    Ok(())
}

#[test]
fn hash_mode_yields_the_id_of_head() -> Result {
    let repo = repos()?.join("three-commits");
    let devstr = get_git_devstr(true, true, Some(repo.as_path()))?;
    assert_eq!(devstr, format!("-git-{}", head_id(&repo)?));
    assert_eq!(devstr.len(), "-git-".len() + 40);
    Ok(())
}

#[test]
fn unborn_head_counts_as_no_repository() -> Result {
    let repo = repos()?.join("unborn");
    for kind in [Kind::Count, Kind::Hash] {
        assert!(matches!(Git::default().probe(kind, &repo), Probe::NoRepository));
    }
    Ok(())
}

#[test]
fn outside_of_a_repository_the_devstr_is_empty_in_both_modes() -> Result {
    let dir = tempfile::tempdir()?;
    for sha in [false, true] {
        assert_eq!(get_git_devstr(sha, false, Some(dir.path()))?, "");
    }
    Ok(())
}

#[test]
fn missing_repository_is_warned_about_only_if_desired() -> Result {
    let dir = tempfile::tempdir()?;

    testing_logger::setup();
    get_git_devstr(false, true, Some(dir.path()))?;
    testing_logger::validate(|captured_logs| {
        let warnings: Vec<_> = captured_logs.iter().filter(|log| log.level == Level::Warn).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].body, "No git repository present! Using default dev version.");
    });

    testing_logger::setup();
    get_git_devstr(false, false, Some(dir.path()))?;
    testing_logger::validate(|captured_logs| {
        assert!(captured_logs.iter().all(|log| log.level != Level::Warn));
    });
    Ok(())
}

#[test]
fn missing_git_is_an_error() {
    let git = Git::with_program("this-git-binary-does-not-exist");
    let dir = std::env::temp_dir();
    let err = git.devstr(Kind::Count, true, Some(dir.as_path())).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
#[cfg(unix)]
fn failing_git_yields_an_empty_devstr_and_warns_with_its_stderr() -> Result {
    let git = Git::with_program(std::path::Path::new("tests").join("fixtures").join("failing-git.sh").canonicalize()?);
    let dir = tempfile::tempdir()?;

    assert!(matches!(
        git.probe(Kind::Count, dir.path()),
        Probe::Failed { code: Some(1), ref stderr } if stderr == "fatal: object database is corrupt"
    ));

    testing_logger::setup();
    assert_eq!(git.devstr(Kind::Count, true, Some(dir.path()))?, "");
    testing_logger::validate(|captured_logs| {
        let warnings: Vec<_> = captured_logs.iter().filter(|log| log.level == Level::Warn).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].body,
            "Git failed while determining revision count: fatal: object database is corrupt"
        );
    });

    testing_logger::setup();
    assert_eq!(git.devstr(Kind::Hash, false, Some(dir.path()))?, "");
    testing_logger::validate(|captured_logs| {
        assert!(captured_logs.iter().all(|log| log.level != Level::Warn));
    });
    Ok(())
}
