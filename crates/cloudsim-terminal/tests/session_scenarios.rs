//! End-to-end sessions driven through `Session::execute`.

use cloudsim_terminal::{FixedClock, Session};
use cloudsim_types::config::SimConfig;

fn session_with(config: SimConfig) -> Session {
    Session::with_clock(config, Box::new(FixedClock::new("10:00:00")))
}

fn session() -> Session {
    session_with(SimConfig {
        seed: Some(2024),
        ..SimConfig::default()
    })
}

fn run(s: &mut Session, line: &str) -> String {
    s.execute(line)
        .map(|entry| entry.output.clone())
        .unwrap_or_default()
}

#[test]
fn create_then_list_shows_one_running_instance() {
    let mut s = session();
    run(&mut s, "create instance web1 compute");
    let list = run(&mut s, "instances list");
    let rows: Vec<&str> = list.lines().skip(1).collect();
    assert_eq!(rows.len(), 1);
    let cols: Vec<&str> = rows[0].split_whitespace().collect();
    assert!(cols[0].starts_with("i-"));
    assert_eq!(&cols[1..], ["web1", "compute", "running"]);
}

#[test]
fn duplicate_create_reports_and_keeps_count() {
    let mut s = session();
    run(&mut s, "create instance web1 compute");
    let out = run(&mut s, "create instance web1 storage");
    assert_eq!(out, "instance 'web1' already exists");
    assert_eq!(s.store().instances.len(), 1);
    assert_eq!(s.log().len(), 2);
}

#[test]
fn start_stop_lifecycle() {
    let mut s = session();
    run(&mut s, "create instance web1 compute");
    run(&mut s, "stop instance web1");
    run(&mut s, "start instance web1");
    let again = run(&mut s, "start instance web1");
    assert!(again.contains("already running"));
    let listed = run(&mut s, "instances list");
    assert!(listed.lines().nth(1).unwrap().ends_with("running"));
}

#[test]
fn describe_reports_id_from_create() {
    let mut s = session();
    run(&mut s, "create instance web1 compute");
    let id = s.store().instances.list()[0].id().to_string();
    run(&mut s, "stop instance web1");
    run(&mut s, "start instance web1");
    let described = run(&mut s, "describe instance web1");
    assert!(described.contains("web1"));
    assert!(described.contains("compute"));
    assert!(described.contains("running"));
    assert!(described.contains(&id));
}

#[test]
fn keygen_then_list_has_fingerprint() {
    let mut s = session();
    run(&mut s, "ssh-keygen foo");
    let list = run(&mut s, "ssh-list");
    let rows: Vec<&str> = list.lines().skip(1).collect();
    assert_eq!(rows.len(), 1);
    let cols: Vec<&str> = rows[0].split_whitespace().collect();
    assert_eq!(cols[0], "foo");
    let groups: Vec<&str> = cols[1].split(':').collect();
    assert_eq!(groups.len(), 16);
    assert!(groups.iter().all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit())));
}

#[test]
fn unknown_command_is_one_entry() {
    let mut s = session();
    let out = run(&mut s, "foobar123");
    assert!(out.contains("command not found"));
    assert_eq!(s.log().len(), 1);
}

#[test]
fn clear_resets_log_but_not_resources() {
    let mut s = session();
    run(&mut s, "create instance web1 compute");
    run(&mut s, "ssh-keygen");
    assert_eq!(s.log().len(), 2);
    assert!(s.execute("clear").is_none());
    assert!(s.log().is_empty());
    assert_eq!(s.store().instances.len(), 1);
    assert_eq!(s.summary().to_string(), "Compute: 1  DB: 0  Storage: 0  Net: 0  Sec: 0  SSH: 1");
}

#[test]
fn errors_do_not_partially_mutate() {
    let mut s = session();
    for line in [
        "create instance",
        "create instance a gpu",
        "create bucket a compute",
        "start instance ghost",
        "ssh-add ghost",
        "git clone https://",
    ] {
        run(&mut s, line);
    }
    assert!(s.store().instances.is_empty());
    assert!(s.store().keys.is_empty());
    assert!(s.store().repos.is_empty());
    assert_eq!(s.log().len(), 6);
}

#[test]
fn clone_resolves_immediately_without_delay() {
    let mut s = session();
    let out = run(&mut s, "git clone https://github.com/acme/app.git");
    assert!(out.starts_with("Cloning into 'app'"));
    assert!(run(&mut s, "git list").contains("cloned"));
    assert!(run(&mut s, "ls").contains("app/"));
}

#[test]
fn clone_with_delay_stays_cloning() {
    let mut s = session_with(SimConfig {
        clone_delay: 2,
        ..SimConfig::default()
    });
    run(&mut s, "git clone https://github.com/acme/app.git");
    assert!(run(&mut s, "git status app").contains("Status: cloning"));
    assert!(run(&mut s, "git status app").contains("Status: cloning"));
    assert!(run(&mut s, "git status app").contains("Status: cloned"));
    assert!(run(&mut s, "git clone https://github.com/acme/app.git").contains("already exists"));
}

#[test]
fn help_is_static() {
    let mut s = session();
    let before = run(&mut s, "help");
    run(&mut s, "create instance web1 compute");
    assert_eq!(run(&mut s, "help"), before);
    assert!(before.contains("ssh-keygen"));
}

#[test]
fn case_sensitive_words() {
    let mut s = session();
    assert!(run(&mut s, "HELP").contains("command not found"));
    run(&mut s, "create instance Web compute");
    run(&mut s, "create instance web compute");
    assert_eq!(s.store().instances.len(), 2);
}
