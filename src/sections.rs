use std::collections::HashMap;

/// The sections a generated recipe document can carry.
///
/// The marker vocabulary is a fixed contract with the generative service;
/// the system prompt in [`crate::generator`] instructs the model to emit
/// exactly these tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Name,
    Ingredients,
    Instructions,
    MealType,
    Cuisine,
    MacronutrientBreakdown,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Name,
        Section::Ingredients,
        Section::Instructions,
        Section::MealType,
        Section::Cuisine,
        Section::MacronutrientBreakdown,
    ];

    /// The literal token that introduces this section in a document.
    pub fn marker(self) -> &'static str {
        match self {
            Section::Name => "[Name:]",
            Section::Ingredients => "[Ingredients:]",
            Section::Instructions => "[Instructions:]",
            Section::MealType => "[Meal Type:]",
            Section::Cuisine => "[Cuisine:]",
            Section::MacronutrientBreakdown => "[Macronutrient Breakdown:]",
        }
    }
}

/// Trimmed section contents keyed by [`Section`].
///
/// Absent sections read as the empty string, never as an error.
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    sections: HashMap<Section, String>,
}

impl SectionMap {
    pub fn get(&self, section: Section) -> &str {
        self.sections.get(&section).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, section: Section) -> bool {
        self.sections.contains_key(&section)
    }

    fn insert(&mut self, section: Section, content: String) {
        self.sections.insert(section, content);
    }
}

/// Split a marker-delimited document into named sections.
///
/// The document is scanned line by line and every marker occurrence is
/// recorded in document order. A section's content is the remainder of its
/// marker line plus every following line up to whichever marker appears next
/// in the raw text, joined and trimmed. A marker with no later marker after
/// it runs to the end of the document.
///
/// Marker order is deliberately not validated: a document that places
/// `[Ingredients:]` after `[Instructions:]` produces garbled sections rather
/// than an error. Stored recipes were written under this behavior, so keep
/// it in mind before tightening the scan.
pub fn extract_sections(document: &str) -> SectionMap {
    let lines: Vec<&str> = document.lines().collect();

    // (line index, column just past the marker token, section)
    let mut boundaries: Vec<(usize, usize, Section)> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        // A line is attributed to the earliest marker it contains.
        let hit = Section::ALL
            .iter()
            .filter_map(|s| line.find(s.marker()).map(|col| (col, *s)))
            .min_by_key(|(col, _)| *col);
        if let Some((col, section)) = hit {
            boundaries.push((idx, col + section.marker().len(), section));
        }
    }

    let mut map = SectionMap::default();
    for (i, &(line_idx, tail_start, section)) in boundaries.iter().enumerate() {
        if map.contains(section) {
            // First occurrence wins; repeats still act as boundaries above.
            continue;
        }
        let end_line = boundaries
            .get(i + 1)
            .map(|&(next_idx, _, _)| next_idx)
            .unwrap_or(lines.len());

        let mut content = String::from(&lines[line_idx][tail_start..]);
        for line in &lines[line_idx + 1..end_line] {
            content.push('\n');
            content.push_str(line);
        }
        map.insert(section, content.trim().to_string());
    }
    map
}
