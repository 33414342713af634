use crate::document::Document;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCount {
    pub id: i32,
    pub document_count: usize,
}

/// Per-classifier counts over a set of selected documents, as returned by
/// `POST /api/documents/selection_data/`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionData {
    #[serde(default)]
    pub selected_correspondents: Vec<SelectionCount>,
    #[serde(default)]
    pub selected_tags: Vec<SelectionCount>,
    #[serde(default)]
    pub selected_document_types: Vec<SelectionCount>,
}

#[derive(Serialize, Debug)]
pub(crate) struct SelectionRequest<'a> {
    pub documents: &'a [i32],
}

/// How much of a selection carries a given classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    All,
    Partial,
    None,
}

impl SelectionState {
    fn from_count(count: usize, selected: usize) -> SelectionState {
        match count {
            0 => SelectionState::None,
            c if c >= selected => SelectionState::All,
            _ => SelectionState::Partial,
        }
    }
}

impl SelectionData {
    /// Counts, for every known classifier id, how many of `selected` carry
    /// it. Ids nobody carries are still listed with a zero count.
    pub fn compute(
        selected: &[&Document],
        correspondents: &[i32],
        tags: &[i32],
        document_types: &[i32],
    ) -> SelectionData {
        SelectionData {
            selected_correspondents: counts(selected, correspondents, |d, id| {
                d.correspondent == Some(id)
            }),
            selected_tags: counts(selected, tags, |d, id| d.has_tag(id)),
            selected_document_types: counts(selected, document_types, |d, id| {
                d.document_type == Some(id)
            }),
        }
    }

    pub fn tag_state(&self, tag: i32, selected: usize) -> SelectionState {
        state_of(&self.selected_tags, tag, selected)
    }

    pub fn correspondent_state(&self, correspondent: i32, selected: usize) -> SelectionState {
        state_of(&self.selected_correspondents, correspondent, selected)
    }

    pub fn document_type_state(&self, document_type: i32, selected: usize) -> SelectionState {
        state_of(&self.selected_document_types, document_type, selected)
    }
}

fn counts(
    selected: &[&Document],
    ids: &[i32],
    carries: impl Fn(&Document, i32) -> bool,
) -> Vec<SelectionCount> {
    ids.iter()
        .map(|&id| SelectionCount {
            id,
            document_count: selected.iter().filter(|d| carries(**d, id)).count(),
        })
        .collect()
}

fn state_of(counts: &[SelectionCount], id: i32, selected: usize) -> SelectionState {
    let count = counts
        .iter()
        .find(|c| c.id == id)
        .map_or(0, |c| c.document_count);
    SelectionState::from_count(count, selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i32, tags: &[i32], correspondent: Option<i32>) -> Document {
        Document {
            id,
            title: String::new(),
            tags: tags.to_vec(),
            correspondent,
            document_type: Some(1),
            created: None,
        }
    }

    #[test]
    fn partial_and_full_tag_selection() {
        let a = doc(1, &[2, 4], Some(9));
        let b = doc(4, &[4, 5], None);
        let data = SelectionData::compute(&[&a, &b], &[9, 14], &[2, 3, 4, 5], &[1]);

        assert_eq!(data.tag_state(4, 2), SelectionState::All);
        assert_eq!(data.tag_state(2, 2), SelectionState::Partial);
        assert_eq!(data.tag_state(5, 2), SelectionState::Partial);
        assert_eq!(data.tag_state(3, 2), SelectionState::None);
        assert_eq!(data.tag_state(99, 2), SelectionState::None);

        assert_eq!(data.correspondent_state(9, 2), SelectionState::Partial);
        assert_eq!(data.correspondent_state(14, 2), SelectionState::None);
        assert_eq!(data.document_type_state(1, 2), SelectionState::All);
    }

    #[test]
    fn zero_counts_are_listed() {
        let a = doc(1, &[], None);
        let data = SelectionData::compute(&[&a], &[9], &[2], &[]);
        assert_eq!(
            data.selected_tags,
            vec![SelectionCount {
                id: 2,
                document_count: 0
            }]
        );
        assert!(data.selected_document_types.is_empty());
    }
}
