//! `corelytics brief` and `corelytics generate`.

use anyhow::{Context, Result};

use corelytics_core::Engine;
use corelytics_core::engine::{GeneratedEmail, prepare};
use corelytics_core::intent::IntentRequest;
use corelytics_core::tree::TreeStore;

/// Print the compiled brief for `request` without calling the gateway.
pub fn run_brief(store: &TreeStore, request: &IntentRequest) -> Result<()> {
    let prepared = prepare(store, request)?;
    eprintln!(
        "# {} ({}, metadata from {:?})",
        prepared.state.summary(),
        prepared.brief.archetype,
        prepared.state.meta_source,
    );
    println!("{}", prepared.brief.text);
    Ok(())
}

/// Generate an email and print it, or the full result as JSON.
pub async fn run_generate(engine: &Engine, request: &IntentRequest, json: bool) -> Result<()> {
    let result = engine.generate(request).await?;
    println!("{}", render_result(&result, json)?);
    Ok(())
}

fn render_result(result: &GeneratedEmail, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(result).context("failed to serialize result");
    }
    let meta = &result.metadata;
    let mut out = format!("# {} ({})\n", meta.intent_path, meta.archetype);
    if meta.used_category_metadata {
        out.push_str("# no scenario given; used category metadata\n");
    }
    out.push('\n');
    out.push_str(result.email.trim_end());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use corelytics_core::CoreError;
    use corelytics_core::gateway::GatewayError;
    use corelytics_test_utils::{ScriptedGenerator, sample_engine};

    use super::*;

    #[tokio::test]
    async fn text_output_has_path_header_and_email() {
        let engine = sample_engine(ScriptedGenerator::replying("Subject: New hours\n\nHi,\n"));
        let result = engine
            .generate(&IntentRequest::new("Work", "Manager", "Schedule Change"))
            .await
            .unwrap();

        let out = render_result(&result, false).unwrap();
        assert!(out.starts_with(
            "# Work → Manager → Schedule Change → Schedule Change (Direct Request)\n"
        ));
        assert!(out.contains("used category metadata"));
        assert!(out.ends_with("Subject: New hours\n\nHi,"));
    }

    #[tokio::test]
    async fn json_output_includes_metadata() {
        let engine = sample_engine(ScriptedGenerator::replying("Subject: Sorry"));
        let request = IntentRequest::new("Work", "Client", "Project").scenario("Delay");
        let result = engine.generate(&request).await.unwrap();

        let out = render_result(&result, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["email"], "Subject: Sorry");
        assert_eq!(value["metadata"]["scenario"], "Delay");
        assert_eq!(value["metadata"]["used_category_metadata"], false);
        assert_eq!(value["metadata"]["archetype"], "Accountability / Apology");
    }

    #[tokio::test]
    async fn gateway_failure_propagates() {
        let engine = sample_engine(ScriptedGenerator::failing("HTTP 401"));
        let err = run_generate(
            &engine,
            &IntentRequest::new("Work", "Manager", "Schedule Change"),
            false,
        )
        .await
        .unwrap_err();
        let core = err.downcast_ref::<CoreError>().expect("core error");
        assert!(matches!(core, CoreError::Generation(GatewayError::Failed(_))));
    }

    #[test]
    fn brief_rejects_unknown_category() {
        let store = corelytics_test_utils::sample_store();
        let err = run_brief(&store, &IntentRequest::new("Work", "Manager", "Payroll")).unwrap_err();
        assert!(err.to_string().contains("category \"Payroll\" not found"));
    }
}
