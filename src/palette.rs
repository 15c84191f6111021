use egui::Color32;

/// Colors offered in the "Colors" group, in display order.
pub const COLORS: [Color32; 11] = [
    Color32::from_rgb(0x00, 0x00, 0x00),
    Color32::from_rgb(0xff, 0xff, 0xff),
    Color32::from_rgb(0xfd, 0x7f, 0x6f),
    Color32::from_rgb(0x7e, 0xb0, 0xd5),
    Color32::from_rgb(0xb2, 0xe0, 0x61),
    Color32::from_rgb(0xbd, 0x7e, 0xbe),
    Color32::from_rgb(0xff, 0xb5, 0x5a),
    Color32::from_rgb(0xff, 0xee, 0x65),
    Color32::from_rgb(0xbe, 0xb9, 0xdb),
    Color32::from_rgb(0xfd, 0xcc, 0xe5),
    Color32::from_rgb(0x8b, 0xd3, 0xc7),
];

pub const PEN_COUNT: u32 = 6;
pub const MIN_PEN_WIDTH: u32 = 1;
pub const PEN_WIDTH_STEP: u32 = 4;

/// 1, 5, 9, ...
pub fn pen_widths() -> Vec<u32> {
    (0..PEN_COUNT)
        .map(|i| MIN_PEN_WIDTH + i * PEN_WIDTH_STEP)
        .collect()
}

/// Result of a selection click that changed something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: usize,
    pub current: usize,
}

/// One group of mutually exclusive swatches.
///
/// The palette owns which entry is selected, so exactly one entry is
/// selected at all times.
#[derive(Debug, Clone)]
pub struct Palette<T> {
    entries: Vec<T>,
    selected: usize,
}

impl<T: Copy> Palette<T> {
    /// The first entry starts out selected. `entries` must not be empty.
    pub fn new(entries: Vec<T>) -> Self {
        debug_assert!(!entries.is_empty(), "palette needs at least one entry");
        Self {
            entries,
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == index
    }

    pub fn selected_value(&self) -> T {
        self.entries[self.selected]
    }

    /// Select `index`, deselecting whatever was selected before.
    ///
    /// Returns `None` when `index` is out of range or already selected.
    pub fn select(&mut self, index: usize) -> Option<SelectionChange> {
        if index >= self.entries.len() || index == self.selected {
            return None;
        }

        let previous = std::mem::replace(&mut self.selected, index);
        Some(SelectionChange {
            previous,
            current: index,
        })
    }
}
