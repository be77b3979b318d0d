use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use quizrun::model::{AnswerSet, OptionLetter, QuestionId, RESULT_PATH};
use quizrun::state::{AppState, Body};
use quizrun::submit::{spawn_submit, HttpSubmitter, SubmitOutcome, SubmitResponse};
use quizrun::view::QuizView;

struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve `replies` in order, one connection each, and report what came in.
fn serve(replies: Vec<String>) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for reply in replies {
            let (stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end().to_string();
                if line.is_empty() {
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    headers.push((k.trim().to_string(), v.trim().to_string()));
                }
            }

            let length = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0);
            let mut body = vec![0u8; length];
            reader.read_exact(&mut body).unwrap();

            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.len(),
                reply
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            let _ = tx.send(CapturedRequest {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8_lossy(&body).to_string(),
            });
        }
    });

    (format!("http://{}", addr), rx)
}

fn sample_answers() -> AnswerSet {
    let mut answers = AnswerSet::new();
    answers.insert(QuestionId::new("q1"), OptionLetter::B);
    answers.insert(QuestionId::new("q2"), OptionLetter::C);
    answers
}

#[test]
fn test_posts_json_answers_to_quiz_path() {
    let (base, rx) = serve(vec![r#"{"status":"ok","score":2,"total":2}"#.to_string()]);
    let submitter = HttpSubmitter::new(&format!("{}/quiz", base)).unwrap();

    let outcome = submitter.submit(&sample_answers());

    let request = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.request_line, "POST /quiz HTTP/1.1");
    assert_eq!(request.header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, serde_json::json!({"q1": "B", "q2": "C"}));

    match outcome {
        SubmitOutcome::Success(response) => {
            assert!(response.is_ok());
            assert_eq!(response.score, Some(2));
            assert_eq!(response.total, Some(2));
        }
        other => panic!("Expected Success, got {:?}", other),
    }
}

#[test]
fn test_error_status_is_a_success_outcome() {
    let (base, _rx) = serve(vec![r#"{"status":"error"}"#.to_string()]);
    let submitter = HttpSubmitter::new(&format!("{}/quiz", base)).unwrap();

    match submitter.submit(&sample_answers()) {
        SubmitOutcome::Success(response) => {
            assert!(!response.is_ok());
            assert_eq!(response.status.as_deref(), Some("error"));
        }
        other => panic!("Expected Success, got {:?}", other),
    }
}

#[test]
fn test_non_json_reply_is_a_failure() {
    let (base, _rx) = serve(vec!["<html>oops</html>".to_string()]);
    let submitter = HttpSubmitter::new(&format!("{}/quiz", base)).unwrap();

    assert!(matches!(
        submitter.submit(&sample_answers()),
        SubmitOutcome::Failure(_)
    ));
}

#[test]
fn test_unreachable_server_is_a_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let submitter = HttpSubmitter::new(&format!("http://{}/quiz", addr)).unwrap();
    assert!(matches!(
        submitter.submit(&sample_answers()),
        SubmitOutcome::Failure(_)
    ));
}

#[test]
fn test_spawn_submit_reports_on_channel() {
    let (base, _rx) = serve(vec![r#"{"status":"ok"}"#.to_string()]);
    let submitter = HttpSubmitter::new(&format!("{}/quiz", base)).unwrap();
    let (tx, rx) = mpsc::channel();

    spawn_submit(submitter, sample_answers(), tx);

    let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Success(ref r) if r.is_ok()));
}

#[test]
fn test_sign_in_posts_welcome_form() {
    let (base, rx) = serve(vec!["{}".to_string()]);
    let submitter = HttpSubmitter::new(&format!("{}/quiz", base)).unwrap();

    submitter.sign_in("Ada Lovelace").unwrap();

    let request = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.request_line, "POST /welcome HTTP/1.1");
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.body, "username=Ada+Lovelace");
}

#[test]
fn test_result_location_resolves_against_quiz_url() {
    let submitter = HttpSubmitter::new("http://quiz.example:5000/quiz").unwrap();
    let mut state = AppState::new("Quiz", Some(submitter.endpoint().clone()));

    state.navigate(RESULT_PATH, &SubmitResponse::default());

    assert!(matches!(
        &state.body,
        Body::Submitted { location, .. } if location == "http://quiz.example:5000/result"
    ));
}

#[test]
fn test_invalid_url_rejected() {
    let err = HttpSubmitter::new("not a url").unwrap_err();
    assert!(err.starts_with("Invalid quiz URL"));
}
