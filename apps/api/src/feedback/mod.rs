// Interview feedback relay: lenient request parsing, prompt templating,
// a single provider call, and the ok/fallback envelopes.
// All provider calls go through llm_client.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod relay;
