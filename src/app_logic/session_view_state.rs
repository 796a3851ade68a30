/*
 * This module defines the SessionViewState struct.
 * SessionViewState holds the presenter-side mirror of what the shell
 * displays: the transcript of result lines (newest entry first) and the
 * contents of the recent-history slots. Keeping the mirror here lets the
 * presenter answer slot activations and emit complete redraw commands
 * without ever querying the shell for its state.
 */
use super::ui_constants::RECENT_SLOT_COUNT;

#[derive(Debug, Default)]
pub struct SessionViewState {
    /* Transcript entries, newest first, exactly as handed to the shell. */
    transcript: Vec<String>,
    /* Recent-slot contents, most recent first; an empty string marks an
     * unused slot. */
    recent_slots: [String; RECENT_SLOT_COUNT],
}

impl SessionViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend_transcript_entry(&mut self, entry: String) {
        self.transcript.insert(0, entry);
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    // Replaces the slot contents from a history snapshot. Entries beyond the
    // slot count are ignored; missing entries clear their slots.
    pub fn set_recent_slots(&mut self, entries: &[String]) {
        for (i, slot) in self.recent_slots.iter_mut().enumerate() {
            *slot = entries.get(i).cloned().unwrap_or_default();
        }
    }

    /// Content of one slot, or `None` when the slot is unused.
    pub fn recent_slot(&self, index: usize) -> Option<&str> {
        self.recent_slots
            .get(index)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn recent_slots_for_display(&self) -> Vec<String> {
        self.recent_slots.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_view_state_is_empty() {
        let state = SessionViewState::new();
        assert!(state.transcript().is_empty());
        for i in 0..RECENT_SLOT_COUNT {
            assert_eq!(state.recent_slot(i), None);
        }
    }

    #[test]
    fn test_prepend_transcript_orders_newest_first() {
        let mut state = SessionViewState::new();
        state.prepend_transcript_entry("first".to_string());
        state.prepend_transcript_entry("second".to_string());
        assert_eq!(state.transcript(), &["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn test_set_recent_slots_fills_and_clears() {
        let mut state = SessionViewState::new();
        state.set_recent_slots(&["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(state.recent_slot(0), Some("a"));
        assert_eq!(state.recent_slot(2), Some("c"));

        state.set_recent_slots(&["z".to_string()]);
        assert_eq!(state.recent_slot(0), Some("z"));
        assert_eq!(state.recent_slot(1), None);
        assert_eq!(state.recent_slot(2), None);
    }

    #[test]
    fn test_recent_slot_out_of_range_is_none() {
        let state = SessionViewState::new();
        assert_eq!(state.recent_slot(RECENT_SLOT_COUNT), None);
    }
}
