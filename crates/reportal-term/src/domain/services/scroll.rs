/// Scroll state for the transcript viewport. Positions are measured in
/// rendered lines, not messages.
#[derive(Default)]
pub struct Scroll {
    pub position: u16,
    entry_count: u16,
    viewport_length: u16,
}

impl Scroll {
    pub fn set_state(&mut self, entry_count: usize, viewport_length: usize) {
        self.entry_count = entry_count.try_into().unwrap_or(u16::MAX);
        self.viewport_length = viewport_length.try_into().unwrap_or(u16::MAX);
        if self.position > self.last_position() {
            self.position = self.last_position();
        }
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn up_page(&mut self) {
        self.position = self.position.saturating_sub(self.viewport_length);
    }

    pub fn down(&mut self) {
        self.position = (self.position + 1).min(self.last_position());
    }

    pub fn down_page(&mut self) {
        self.position = (self.position + self.viewport_length).min(self.last_position());
    }

    pub fn last(&mut self) {
        self.position = self.last_position();
    }

    pub fn is_position_at_last(&self) -> bool {
        return self.position >= self.last_position();
    }

    fn last_position(&self) -> u16 {
        return self.entry_count.saturating_sub(self.viewport_length);
    }
}
