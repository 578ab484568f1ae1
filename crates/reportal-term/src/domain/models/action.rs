/// Backend-facing work requested by the UI.
#[derive(Debug, Clone)]
pub enum Action {
    GenerateReport {
        query: String,
        session_id: Option<String>,
    },
}
