//! `switchboard resolve` — Resolve the system prompt for a caller.

use switchboard_agent::PromptResolver;
use switchboard_core::request::RequestContext;
use switchboard_memory::InMemoryStore;

pub async fn run(
    caller_id: &str,
    message_count: u32,
    style: Option<&str>,
    explain: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = InMemoryStore::new();
    if let Some(style) = style {
        store.set_style(caller_id, style)?;
    }

    let context = RequestContext::new(caller_id, message_count);
    let prompt = PromptResolver::new().resolve(&context, &store)?;

    if explain {
        println!("🔍 Resolved prompt for '{caller_id}' (message_count = {message_count})");
        println!();
        for (layer, text) in prompt.segments() {
            println!("  [{layer}] {text}");
        }
    } else {
        println!("{prompt}");
    }

    Ok(())
}
