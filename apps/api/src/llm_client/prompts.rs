// Cross-cutting prompt fragments used by the provider backends themselves.
// Domain prompts live next to the code that builds them (see portfolio::prompts).

/// Minimal prompt sent by backends whose only credential check is a trial generation.
pub const CREDENTIAL_PROBE_PROMPT: &str = "Hello";
