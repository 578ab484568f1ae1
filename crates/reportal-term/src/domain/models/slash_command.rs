/// Commands typed into the input box instead of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Help,
    Quit,
}

impl SlashCommand {
    pub fn parse(input: &str) -> Option<SlashCommand> {
        match input.trim() {
            "/clear" => Some(SlashCommand::Clear),
            "/help" | "/h" => Some(SlashCommand::Help),
            "/quit" | "/exit" | "/q" => Some(SlashCommand::Quit),
            _ => None,
        }
    }
}
