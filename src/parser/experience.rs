use crate::record::ExperienceEntry;

/// Lines an experience block always consumes, present or not.
pub const BLOCK_LEN: usize = 4;

/// Consume a 4-line block starting at `start`: title, company, duration,
/// location. The location slot only takes its line if it contains a comma;
/// otherwise that line is still consumed and dropped. Slots past the end of
/// `lines` stay empty.
///
/// Returns the entry and the index to resume at (`start + BLOCK_LEN`).
pub fn consume_block(lines: &[String], start: usize) -> (ExperienceEntry, usize) {
    let slot = |offset: usize| lines.get(start + offset).cloned().unwrap_or_default();

    let location = slot(3);
    let entry = ExperienceEntry {
        title: slot(0),
        company: slot(1),
        duration: slot(2),
        location: if location.contains(',') {
            location
        } else {
            String::new()
        },
    };

    (entry, start + BLOCK_LEN)
}
