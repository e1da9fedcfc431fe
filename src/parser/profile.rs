use tracing::{debug, warn};

use super::experience::consume_block;
use super::lines::{has_headline_token, is_contact_marker, is_name_shape, neighbor, normalize};
use super::sections::Section;
use crate::record::ProfileRecord;

const SEE_MORE: &str = "…see more";

/// Walk the normalized lines once and fill a `ProfileRecord`.
///
/// Rules per line, first match wins:
/// 1. name (if unset) from a name-shaped line
/// 2. headline (if unset, and name is set) from a line containing "at"
/// 3. first "Contact info" marker: location from the previous line,
///    connections from the next one (neighbors are still visited on their own)
/// 4. section marker switches the current section
/// 5. under About, the line is appended to the bio
/// 6. under Experience, a 4-line block is consumed as one entry
///
/// Never fails; empty input gives an empty record.
pub fn classify(text: &str) -> ProfileRecord {
    let mut record = ProfileRecord::default();

    if text.is_empty() {
        warn!("No text provided to classifier");
        return record;
    }

    let lines = normalize(text);
    debug!("Normalized {} lines", lines.len());

    let mut section = Section::None;
    let mut contact_seen = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_str();

        if record.name.is_empty() && is_name_shape(line) {
            record.name = line.to_string();
        } else if record.headline.is_empty() && !record.name.is_empty() && has_headline_token(line)
        {
            record.headline = line.to_string();
        } else if is_contact_marker(line) {
            // Only the first marker fills location/connections.
            if !contact_seen {
                record.location = neighbor(&lines, i.checked_sub(1)).to_string();
                record.connections = neighbor(&lines, Some(i + 1)).to_string();
                contact_seen = true;
            }
        } else if let Some(next) = Section::from_marker(line) {
            section = next;
        } else {
            match section {
                Section::About => {
                    record.bio.push_str(line);
                    record.bio.push(' ');
                }
                Section::Experience => {
                    let (entry, next) = consume_block(&lines, i);
                    record.experience.push(entry);
                    i = next;
                    continue;
                }
                Section::None | Section::Education => {}
            }
        }

        i += 1;
    }

    record.bio = record.bio.replace(SEE_MORE, "").trim().to_string();
    record.full_text = text.to_string();

    debug!(
        name = %record.name,
        headline = %record.headline,
        experience = record.experience.len(),
        "Classified profile"
    );
    record
}
