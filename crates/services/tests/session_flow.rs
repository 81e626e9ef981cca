use std::sync::Arc;

use quiz_core::model::{Configuration, Level, Question, QuestionId};
use quiz_core::time::fixed_clock;
use services::test_support::ScriptedCompletion;
use services::{CONSOLATION_MESSAGE, Feedback, Phase, QuizSessionService};

const ACID_QUESTION: &str = r#"Sure! {"question":"Which solution has the lowest pH?","options":["A. 0.1 M HCl","B. 0.1 M NaOH","C. pure water","D. 0.1 M NaCl"],"correctAnswer":0,"explanation":"HCl is a strong acid.","topic":"Acids and bases","difficulty":"havo_year_4"} Good luck!"#;

const BASE_QUESTION: &str = r#"{"question":"Which ion makes a solution basic?","options":["A. H3O+","B. Cl-","C. OH-","D. Na+"],"correctAnswer":2,"explanation":"OH- ions raise the pH.","topic":"Acids and bases","difficulty":"havo_year_4"}"#;

const HINTS: &str = "1. What does pH measure? 2. Which substance releases H+ ions? 3. HCl is a strong acid, so A has the lowest pH.";

fn acids_config() -> Configuration {
    Configuration::new(Level::Havo, 4, "Acids and bases").unwrap()
}

#[tokio::test]
async fn transport_failure_yields_fallback_question() {
    let completion = Arc::new(ScriptedCompletion::new().fail("connection refused"));
    let service = QuizSessionService::new(completion, fixed_clock());

    let session = service.start_session(acids_config()).await;

    let expected = Question::fallback(&acids_config(), QuestionId::from_timestamp(0, 0));
    let question = session.question().expect("fallback question installed");
    assert_eq!(session.phase(), Phase::Answering);
    assert_eq!(question.prompt(), expected.prompt());
    assert_eq!(question.options(), expected.options());
    assert_eq!(question.correct_index(), expected.correct_index());
    assert_eq!(question.explanation(), expected.explanation());
    assert_eq!(question.topic(), "Acids and bases");
    assert_eq!(question.difficulty(), "havo_year_4");
}

#[tokio::test]
async fn unparseable_reply_also_yields_fallback() {
    let completion = Arc::new(ScriptedCompletion::new().reply("I'd rather not answer in JSON."));
    let service = QuizSessionService::new(completion, fixed_clock());

    let session = service.start_session(acids_config()).await;

    assert_eq!(session.phase(), Phase::Answering);
    assert_eq!(
        session.question().unwrap().prompt(),
        "What is the chemical formula of water?"
    );
}

#[tokio::test]
async fn correct_answer_then_next_question() {
    let completion = Arc::new(
        ScriptedCompletion::new()
            .reply(ACID_QUESTION)
            .reply(BASE_QUESTION),
    );
    let service = QuizSessionService::new(completion.clone(), fixed_clock());
    let mut session = service.start_session(acids_config()).await;
    let first_id = session.question().unwrap().id().clone();

    session.select_option(0);
    service.submit_answer(&mut session).await;

    assert_eq!(session.phase(), Phase::Correct);
    assert_eq!(session.score().correct(), 1);
    assert_eq!(session.score().total(), 1);
    assert_eq!(
        session.feedback(),
        Some(&Feedback::Explanation("HCl is a strong acid.".into()))
    );

    service.next_question(&mut session).await;

    assert_eq!(session.phase(), Phase::Answering);
    assert_eq!(session.selected_option(), None);
    assert!(session.feedback().is_none());
    let second = session.question().unwrap();
    assert_ne!(second.id(), &first_id);
    assert_eq!(second.correct_index(), 2);
    assert_eq!(session.score().total(), 1);
    assert_eq!(completion.remaining(), 0);
}

#[tokio::test]
async fn wrong_answer_walks_through_hints() {
    let completion = Arc::new(
        ScriptedCompletion::new()
            .reply(ACID_QUESTION)
            .reply(HINTS)
            .reply(BASE_QUESTION),
    );
    let service = QuizSessionService::new(completion, fixed_clock());
    let mut session = service.start_session(acids_config()).await;

    session.select_option(1);
    service.submit_answer(&mut session).await;

    assert_eq!(session.phase(), Phase::Guidance);
    assert_eq!(session.score().correct(), 0);
    assert_eq!(session.score().total(), 1);
    let guidance = session.guidance().unwrap();
    assert_eq!(guidance.len(), 3);
    assert_eq!(guidance.revealed(), &["What does pH measure?".to_string()]);

    for _ in 0..5 {
        session.advance_hint();
    }
    let guidance = session.guidance().unwrap();
    assert_eq!(guidance.reveal_index(), 2);
    assert!(guidance.is_fully_revealed());

    service.next_question(&mut session).await;

    assert_eq!(session.phase(), Phase::Answering);
    assert!(session.guidance().is_none());
    assert_eq!(session.selected_option(), None);
}

#[tokio::test]
async fn guidance_failure_degrades_to_consolation() {
    let completion = Arc::new(
        ScriptedCompletion::new()
            .reply(ACID_QUESTION)
            .fail("502 bad gateway"),
    );
    let service = QuizSessionService::new(completion, fixed_clock());
    let mut session = service.start_session(acids_config()).await;

    session.select_option(3);
    service.submit_answer(&mut session).await;

    assert_eq!(session.phase(), Phase::Incorrect);
    assert_eq!(
        session.feedback().map(Feedback::text),
        Some(CONSOLATION_MESSAGE)
    );
    assert_eq!(session.score().total(), 1);
    assert_eq!(session.score().correct(), 0);
    assert!(session.guidance().is_none());
}

#[tokio::test]
async fn submit_without_selection_changes_nothing() {
    let completion = Arc::new(ScriptedCompletion::new().reply(ACID_QUESTION));
    let service = QuizSessionService::new(completion, fixed_clock());
    let mut session = service.start_session(acids_config()).await;
    let before = session.state().clone();

    service.submit_answer(&mut session).await;

    assert_eq!(session.state(), &before);
}

#[tokio::test]
async fn score_accumulates_across_questions_until_reset() {
    let completion = Arc::new(
        ScriptedCompletion::new()
            .reply(ACID_QUESTION)
            .reply(BASE_QUESTION)
            .reply(ACID_QUESTION),
    );
    let service = QuizSessionService::new(completion, fixed_clock());
    let mut session = service.start_session(acids_config()).await;

    session.select_option(0);
    service.submit_answer(&mut session).await;
    service.next_question(&mut session).await;
    session.select_option(2);
    service.submit_answer(&mut session).await;

    assert_eq!(session.score().correct(), 2);
    assert_eq!(session.score().total(), 2);
    assert_eq!(session.score().percentage(), Some(100));

    let config = session.reset_session();
    assert_eq!(session.score().total(), 0);
    assert!(session.question().is_none());

    let session = service.start_session(config).await;
    assert_eq!(session.score().total(), 0);
    assert_eq!(session.phase(), Phase::Answering);
}
