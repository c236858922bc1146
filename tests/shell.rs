//! Shell integration tests
//!
//! Drive the full dispatch loop with a scripted gateway, canned prompter and
//! fake capabilities; no audio hardware or network.

use marcus::providers::{self, launcher, translate, weather};
use marcus::session::{
    ERP_ALREADY_IN_USE, ERP_ONBOARDING, ERP_WELCOME, NOT_RECOGNIZED, PROFILE_FAILURE,
};
use marcus::shell::{ASSIST_PROMPT, EXIT_MESSAGE, WIKIPEDIA_DEPRECATED};
use marcus::{Mode, ModeFlow, SessionState};

mod common;

use common::{
    ANSWERS, CannedPrompter, FakeCapabilities, ScriptedGateway, Step, profile_store, run_script,
    shell_with, store_profile,
};

#[test]
fn test_solve_speaks_result() {
    let dir = tempfile::tempdir().unwrap();
    let shell = run_script(dir.path(), &["solve 2 + 2"]);

    assert_eq!(shell.gateway().replies(), vec!["The result is: 4"]);
    assert_eq!(shell.gateway().spoken[0], "Marcus AI says: The result is: 4");
}

#[test]
fn test_top_level_exit_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let shell = run_script(dir.path(), &["exit", "solve 1 + 1"]);

    assert_eq!(shell.gateway().replies(), vec![EXIT_MESSAGE]);
    assert_eq!(shell.gateway().remaining(), 1);
}

#[test]
fn test_unmatched_speaks_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let shell = run_script(dir.path(), &["sing me a song"]);

    assert_eq!(shell.gateway().replies(), vec![providers::FALLBACK_MESSAGE]);
    assert_eq!(shell.session().state(), SessionState::Idle);
}

#[test]
fn test_translate() {
    let dir = tempfile::tempdir().unwrap();
    let shell = run_script(
        dir.path(),
        &[
            "translate good morning into spanish",
            "translate hello",
            "translate a into b into c",
        ],
    );

    assert_eq!(
        shell.gateway().replies(),
        vec![
            "The translation is: [spanish] good morning",
            translate::SPECIFY_MESSAGE,
            translate::SPECIFY_MESSAGE,
        ]
    );
}

#[test]
fn test_service_failures_become_sentences() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::new(&["translate hi into french", "weather update", "open youtube"]),
        CannedPrompter::default(),
        FakeCapabilities::failing(),
    );
    shell.run(false).unwrap();

    assert_eq!(
        shell.gateway().replies(),
        vec![
            translate::FAILURE_MESSAGE,
            weather::FAILURE_MESSAGE,
            launcher::FAILURE_MESSAGE,
        ]
    );
}

#[test]
fn test_briefings_and_misc_commands() {
    let dir = tempfile::tempdir().unwrap();
    let shell = run_script(
        dir.path(),
        &[
            "news update",
            "stock market update",
            "summarize rust is fast",
            "analyze my dream i could fly",
            "search wikipedia for rust",
        ],
    );

    assert_eq!(
        shell.gateway().replies(),
        vec![
            "Here are the top news headlines: a, b",
            "^NSEI is at 100.00, up 1.00%.",
            "summary of rust is fast",
            "Analyzing your dream: i could fly. Insights coming soon!",
            WIKIPEDIA_DEPRECATED,
        ]
    );
}

#[test]
fn test_open_commands_launch() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::new(&["open youtube", "open chrome", "open site"]),
        CannedPrompter::default(),
        FakeCapabilities::default(),
    )
    .with_site_url("https://example.com");
    shell.run(false).unwrap();

    assert_eq!(
        *shell.capabilities().opened.borrow(),
        vec!["https://www.youtube.com", "chrome", "https://example.com"]
    );
    assert_eq!(
        shell.gateway().replies().last().copied(),
        Some("Opening the site: https://example.com")
    );
}

#[test]
fn test_first_erp_entry_onboards() {
    let dir = tempfile::tempdir().unwrap();
    let prompter = CannedPrompter::new(&ANSWERS);
    let asked = prompter.counter();

    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::new(&["start erp", "track expenses", "exit"]),
        prompter,
        FakeCapabilities::default(),
    );
    shell.run(false).unwrap();

    assert_eq!(
        shell.gateway().replies(),
        vec![ERP_ONBOARDING, ERP_WELCOME, "Tracking expenses.", "Leaving ERP."]
    );
    assert_eq!(asked.get(), 6);
    assert!(shell.session().erp_system_used());

    let stored = profile_store(dir.path()).load().unwrap().unwrap();
    assert_eq!(stored.name, "Acme Traders");
    assert_eq!(stored.notes, "family owned");
}

#[test]
fn test_second_erp_entry_is_already_in_use() {
    let dir = tempfile::tempdir().unwrap();
    store_profile(dir.path());
    let prompter = CannedPrompter::new(&ANSWERS);
    let asked = prompter.counter();

    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::new(&["start erp", "exit", "start erp", "exit"]),
        prompter,
        FakeCapabilities::default(),
    );
    shell.run(false).unwrap();

    let gateway = shell.gateway();
    assert_eq!(gateway.count(ERP_ONBOARDING), 0);
    assert_eq!(gateway.count(ERP_WELCOME), 1);
    assert_eq!(gateway.count(ERP_ALREADY_IN_USE), 1);
    assert_eq!(asked.get(), 0);
}

#[test]
fn test_fresh_session_welcomes_again() {
    let dir = tempfile::tempdir().unwrap();
    store_profile(dir.path());

    for _ in 0..2 {
        let shell = run_script(dir.path(), &["start erp", "exit"]);
        assert_eq!(shell.gateway().count(ERP_WELCOME), 1);
        assert_eq!(shell.gateway().count(ERP_ALREADY_IN_USE), 0);
    }
}

#[test]
fn test_profile_failure_keeps_session_idle() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::new(&["start erp", "track expenses"]),
        CannedPrompter::failing(),
        FakeCapabilities::default(),
    );
    shell.run(false).unwrap();

    assert_eq!(
        shell.gateway().replies(),
        vec![ERP_ONBOARDING, PROFILE_FAILURE, providers::FALLBACK_MESSAGE]
    );
    assert_eq!(shell.session().state(), SessionState::Idle);
    assert!(!shell.session().erp_system_used());
    assert!(!profile_store(dir.path()).exists());
}

#[test]
fn test_corrupt_profile_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("business_details.json"), "{oops").unwrap();

    let shell = run_script(dir.path(), &["start erp"]);
    assert_eq!(shell.gateway().replies(), vec![PROFILE_FAILURE]);
}

#[test]
fn test_unrecognized_mode_command_stays_in_mode() {
    let modes = [
        ("start erp", Mode::Erp),
        ("start fintech", Mode::FinTech),
        ("start personal ai", Mode::PersonalAi),
        ("start healthcare robot", Mode::HealthcareRobot),
    ];

    for (start, mode) in modes {
        let dir = tempfile::tempdir().unwrap();
        store_profile(dir.path());
        let shell = run_script(dir.path(), &[start, "make me a coffee"]);

        let replies = shell.gateway().replies();
        assert_eq!(shell.gateway().count(NOT_RECOGNIZED), 1, "{mode}");
        assert_eq!(replies.last().copied(), Some(NOT_RECOGNIZED), "{mode}");
        assert_eq!(shell.session().state(), SessionState::InMode(mode));
    }
}

#[test]
fn test_mode_command_against_prebuilt_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::new(&[]),
        CannedPrompter::default(),
        FakeCapabilities::default(),
    );
    let table = Mode::FinTech.table();

    for utterance in ["monitor stocks", "track portfolio", "fly to the moon"] {
        assert_eq!(
            shell
                .handle_mode_command(Mode::FinTech, &table, utterance)
                .unwrap(),
            ModeFlow::Stay
        );
    }
    assert_eq!(
        shell.handle_mode_command(Mode::FinTech, &table, "exit").unwrap(),
        ModeFlow::Leave
    );
    assert_eq!(
        shell.gateway().replies(),
        vec![
            "Monitoring stocks.",
            "Tracking portfolio.",
            NOT_RECOGNIZED,
            "Leaving FinTech.",
        ]
    );
}

#[test]
fn test_mode_exit_returns_to_top_level() {
    let dir = tempfile::tempdir().unwrap();
    let shell = run_script(
        dir.path(),
        &["start personal ai", "set reminders", "solve 3 * 3", "exit", "solve 3 * 3"],
    );

    assert_eq!(
        shell.gateway().replies(),
        vec![
            Mode::PersonalAi.welcome(),
            "Setting reminders.",
            NOT_RECOGNIZED,
            "Leaving Personal AI.",
            "The result is: 9",
        ]
    );
    assert_eq!(shell.session().state(), SessionState::Idle);
}

#[test]
fn test_exit_twice_from_a_mode_ends_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let shell = run_script(
        dir.path(),
        &["start healthcare robot", "monitor fitness", "exit", "exit", "solve 1 + 1"],
    );

    assert_eq!(
        shell.gateway().replies(),
        vec![
            Mode::HealthcareRobot.welcome(),
            "Monitoring fitness.",
            "Leaving Healthcare Robot.",
            EXIT_MESSAGE,
        ]
    );
    assert_eq!(shell.gateway().remaining(), 1);
}

#[test]
fn test_open_site_inside_mode() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::new(&["start fintech", "open site", "exit"]),
        CannedPrompter::default(),
        FakeCapabilities::default(),
    )
    .with_site_url("https://example.com/erp");
    shell.run(false).unwrap();

    assert_eq!(*shell.capabilities().opened.borrow(), vec!["https://example.com/erp"]);
    assert_eq!(shell.gateway().count("Opening the site: https://example.com/erp"), 1);
}

#[test]
fn test_timeouts_and_silence_are_not_commands() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::from_steps(vec![
            Step::Timeout,
            Step::Silence,
            Step::Say("start fintech".into()),
            Step::Timeout,
            Step::Say("monitor stocks".into()),
        ]),
        CannedPrompter::default(),
        FakeCapabilities::default(),
    );
    shell.run(false).unwrap();

    assert_eq!(
        shell.gateway().replies(),
        vec![Mode::FinTech.welcome(), "Monitoring stocks."]
    );
}

#[test]
fn test_greeting() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with(
        dir.path(),
        ScriptedGateway::new(&[]),
        CannedPrompter::default(),
        FakeCapabilities::default(),
    );
    shell.run(true).unwrap();

    let replies = shell.gateway().replies();
    assert_eq!(replies.len(), 2);
    assert!(
        ["Good morning!", "Good afternoon!", "Good evening!", "Good night!"].contains(&replies[0])
    );
    assert_eq!(replies[1], ASSIST_PROMPT);
}

#[test]
fn test_transcript_is_appended() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spoken_responses.txt");

    run_script(dir.path(), &["solve 2 + 2"]);
    run_script(dir.path(), &["what year is it"]);

    let transcript = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "User: solve 2 + 2");
    assert_eq!(lines[1], "Marcus AI says: The result is: 4");
    assert_eq!(lines[2], "User: what year is it");
    assert!(lines[3].starts_with("Marcus AI says: It is "));
}
