//! End-to-end assembly sessions driven by scripted answers.
//!
//! Each test replays a full interactive session through the linker and folds
//! the result through the document builder, asserting on the rendered ASL.

use forge_cli::assembler::{link, no, pick, text, yes, Answer, LinkMode, ScriptedPrompt};
use forge_cli::domain::{DocumentError, WorkflowDocument};
use serde_json::json;

/// Answers for one Task state's field block with everything left blank:
/// Comment, InputPath, OutputPath, ResultPath, Parameters, ResultSelector,
/// then the retrier and catcher confirmations declined.
fn blank_task_fields() -> Vec<Answer> {
    vec![
        text(""),
        text(""),
        text(""),
        text(""),
        text(""),
        text(""),
        no(),
        no(),
    ]
}

fn run_session(pool: &[&str], script: Vec<Answer>) -> WorkflowDocument {
    let pool: Vec<String> = pool.iter().map(|s| s.to_string()).collect();
    let mut prompt = ScriptedPrompt::new(script);

    let chain = link(&mut prompt, "Add lambda", &pool, LinkMode::Root).expect("session failed");
    assert!(prompt.is_drained(), "unconsumed scripted answers");

    WorkflowDocument::from_chain(chain).expect("invalid chain")
}

#[test]
fn two_lambdas_link_into_a_sequential_machine() {
    let mut script = vec![pick("Task"), pick("lab")];
    script.extend(blank_task_fields());
    script.push(pick("test")); // Next
    script.push(yes()); // continue into the pinned round
    script.push(pick("Task"));
    script.extend(blank_task_fields());

    let doc = run_session(&["lab", "test"], script);
    let rendered = doc.render();

    assert_eq!(rendered["StartAt"], json!("Lab"));
    assert_eq!(rendered["States"]["Lab"]["Type"], json!("Task"));
    assert_eq!(
        rendered["States"]["Lab"]["Resource"],
        json!("${aws_lambda_function.lab.arn}")
    );
    assert_eq!(rendered["States"]["Lab"]["Next"], json!("Test"));
    assert_eq!(rendered["States"]["Test"]["End"], json!(true));
}

#[test]
fn a_single_succeed_state_machine() {
    let script = vec![
        pick("Succeed"),
        text("done"), // freeform name
        no(),         // stop after one state
    ];

    let doc = run_session(&["lab"], script);
    let rendered = doc.render();

    assert_eq!(rendered["StartAt"], json!("Done"));
    assert_eq!(rendered["States"]["Done"]["Type"], json!("Succeed"));
    assert_eq!(rendered["States"]["Done"].get("Next"), None);
    assert_eq!(rendered["States"]["Done"].get("End"), None);
}

#[test]
fn choice_state_routes_through_rules_and_default() {
    let script = vec![
        pick("Choice"),
        text("route"), // freeform name
        text(""),      // Comment
        text(""),      // InputPath
        text(""),      // OutputPath
        text(r#"{"Variable": "$.total", "NumericGreaterThan": 100}"#),
        pick("ship"),
        yes(), // another rule
        text(r#"{"Variable": "$.total", "NumericLessThanEquals": 0}"#),
        pick("End"),
        no(),           // no more rules
        pick("refund"), // default target
        no(),           // end the session
    ];

    let doc = run_session(&["refund", "ship"], script);
    let rendered = doc.render();
    let route = &rendered["States"]["Route"];

    assert_eq!(route["Type"], json!("Choice"));
    assert_eq!(route["Choices"].as_array().unwrap().len(), 2);
    assert_eq!(route["Choices"][0]["Variable"], json!("$.total"));
    assert_eq!(route["Choices"][0]["Next"], json!("Ship"));
    assert_eq!(route["Choices"][1]["Next"], json!("End"));
    assert_eq!(route["Default"], json!("Refund"));
    // A Choice routes only through its rules, never its own transition.
    assert_eq!(route.get("Next"), None);
    assert_eq!(route.get("End"), None);
}

#[test]
fn retriers_accumulate_across_composer_rounds() {
    let mut script = vec![pick("Task"), pick("lab")];
    script.extend(vec![
        text(""), // Comment
        text(""), // InputPath
        text(""), // OutputPath
        text(""), // ResultPath
        text(""), // Parameters
        text(""), // ResultSelector
        yes(),    // add a retrier
        text(""), // ErrorEquals, defaults to States.ALL
        text("3"), // IntervalSeconds
        text("2"), // MaxAttempts
        text(""), // BackoffRate
        yes(),    // another retrier
        text("States.Timeout"),
        text(""),
        text(""),
        text("1.5"),
        no(), // stop retriers
        no(), // no catcher
    ]);
    // Pool exhausted after the only lambda: no Next prompt, forced End.

    let doc = run_session(&["lab"], script);
    let retry = &doc.render()["States"]["Lab"]["Retry"];

    assert_eq!(retry.as_array().unwrap().len(), 2);
    assert_eq!(retry[0]["ErrorEquals"], json!(["States.ALL"]));
    assert_eq!(retry[0]["IntervalSeconds"], json!(3));
    assert_eq!(retry[0]["MaxAttempts"], json!(2));
    assert_eq!(retry[1]["ErrorEquals"], json!(["States.Timeout"]));
    assert_eq!(retry[1]["BackoffRate"], json!(1.5));
}

#[test]
fn map_state_wraps_a_lambda_in_its_iterator() {
    let mut script = vec![
        pick("Map"),
        text("mapper"), // freeform name
        text(""),       // Comment
        text(""),       // InputPath
        text(""),       // OutputPath
        text(""),       // ResultPath
        text(""),       // Parameters
        text(""),       // ResultSelector
        no(),           // retrier?
        no(),           // catcher?
        // Nested iterator session: exactly one state.
        pick("Task"),
        pick("worker"),
    ];
    script.extend(blank_task_fields());
    script.push(pick("End")); // the Map state's own Next
    script.push(no()); // end the session

    let doc = run_session(&["worker"], script);
    let rendered = doc.render();
    let mapper = &rendered["States"]["Mapper"];

    assert_eq!(mapper["Type"], json!("Map"));
    assert_eq!(mapper["Iterator"]["StartAt"], json!("Worker"));
    assert_eq!(
        mapper["Iterator"]["States"]["Worker"]["Resource"],
        json!("${aws_lambda_function.worker.arn}")
    );
    assert_eq!(mapper["Iterator"]["States"]["Worker"]["End"], json!(true));
    assert_eq!(mapper["End"], json!(true));
}

#[test]
fn parallel_state_wraps_each_member_in_its_own_branch() {
    let mut script = vec![
        pick("Parallel"),
        text("fanout"), // freeform name
        text(""),       // Comment
        text(""),       // InputPath
        text(""),       // OutputPath
        text(""),       // ResultPath
        text(""),       // Parameters
        text(""),       // ResultSelector
        no(),           // retrier?
        no(),           // catcher?
        // Nested branch session over the remaining pool.
        pick("Task"),
        pick("alpha"),
    ];
    script.extend(blank_task_fields());
    script.push(yes()); // another branch member
    script.push(pick("Task"));
    script.push(pick("beta"));
    script.extend(blank_task_fields());
    // Branch pool exhausted, nested session ends on its own.
    script.push(pick("End")); // the Parallel state's own Next
    script.push(no()); // end the session

    let doc = run_session(&["alpha", "beta"], script);
    let rendered = doc.render();
    let fanout = &rendered["States"]["Fanout"];

    assert_eq!(fanout["Type"], json!("Parallel"));
    let branches = fanout["Branches"].as_array().unwrap();
    assert_eq!(branches.len(), 2);

    // Each member is an independent single-state document: its own StartAt,
    // one terminal state, its own Resource.
    for (branch, name) in branches.iter().zip(["Alpha", "Beta"]) {
        assert_eq!(branch["StartAt"], json!(name));
        let states = branch["States"].as_object().unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[name]["End"], json!(true));
        assert_eq!(states[name].get("Next"), None);
    }
    assert_eq!(
        branches[0]["States"]["Alpha"]["Resource"],
        json!("${aws_lambda_function.alpha.arn}")
    );
    assert_eq!(fanout["End"], json!(true));
}

#[test]
fn empty_pool_yields_no_document() {
    let mut prompt = ScriptedPrompt::new([]);
    let chain = link(&mut prompt, "Add lambda", &[], LinkMode::Root).unwrap();

    assert!(chain.is_empty());
    assert_eq!(prompt.prompts_issued(), 0);
    assert_eq!(
        WorkflowDocument::from_chain(chain).unwrap_err(),
        DocumentError::EmptyChain
    );
}

#[test]
fn identical_sessions_render_byte_identical_documents() {
    let session = || {
        let mut script = vec![pick("Task"), pick("lab")];
        script.extend(blank_task_fields());
        script.push(pick("test"));
        script.push(yes());
        script.push(pick("Task"));
        script.extend(blank_task_fields());
        run_session(&["lab", "test"], script).to_json_string()
    };

    assert_eq!(session(), session());
}
