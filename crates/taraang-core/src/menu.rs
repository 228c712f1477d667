//! # Menu Selection Model
//!
//! Per-category item lists for the vegetarian and non-vegetarian menus,
//! plus staples and ice cream.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          MenuSelection                                  │
//! │                                                                         │
//! │  Veg                                   Non-Veg                          │
//! │  ├── Welcome Drinks  [..≤10]           ├── Starters  [..≤10]            │
//! │  ├── Snacks          [..≤10]           ├── Gravy     [..≤10]            │
//! │  ├── Sweets          [..≤10]           ├── Fry       [..≤10]            │
//! │  ├── Hot Items       [..≤10]           └── Biryani   [..≤10]            │
//! │  ├── Pappu           [..≤10]                                            │
//! │  ├── Curry           [..≤10]                                            │
//! │  ├── Fry             [..≤10]                                            │
//! │  ├── Pickle          [..≤10]                                            │
//! │  ├── Staples         12 flags (fixed order) + custom staples            │
//! │  └── Ice Cream       enabled? + flavours                                │
//! │                                                                         │
//! │  Bound: FreeText (≤10, any text) | Constrained (≤2, vocabulary/"Other") │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Display Filter
//! Every place that shows a list (document composer, summary text) goes
//! through [`MenuSelection::visible_items`]. Blank entries and the `"Other"`
//! placeholder never reach the operator or the customer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog;
use crate::error::CoreError;
use crate::{MAX_CONSTRAINED_SELECTIONS, MAX_MENU_ITEMS, OTHER_SENTINEL};

// =============================================================================
// Categories
// =============================================================================

/// Vegetarian categories in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VegCategory {
    WelcomeDrinks,
    Snacks,
    Sweets,
    HotItems,
    Pappu,
    Curry,
    Fry,
    Pickle,
}

impl VegCategory {
    pub const ALL: [VegCategory; 8] = [
        VegCategory::WelcomeDrinks,
        VegCategory::Snacks,
        VegCategory::Sweets,
        VegCategory::HotItems,
        VegCategory::Pappu,
        VegCategory::Curry,
        VegCategory::Fry,
        VegCategory::Pickle,
    ];
}

/// Non-vegetarian categories in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NonVegCategory {
    Starters,
    Gravy,
    Fry,
    Biryani,
}

impl NonVegCategory {
    pub const ALL: [NonVegCategory; 4] = [
        NonVegCategory::Starters,
        NonVegCategory::Gravy,
        NonVegCategory::Fry,
        NonVegCategory::Biryani,
    ];
}

/// Any menu category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Veg(VegCategory),
    NonVeg(NonVegCategory),
}

impl Category {
    /// Heading shown before the items.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Veg(VegCategory::WelcomeDrinks) => "Welcome Drinks",
            Category::Veg(VegCategory::Snacks) => "Snacks",
            Category::Veg(VegCategory::Sweets) => "Sweets",
            Category::Veg(VegCategory::HotItems) => "Hot Items",
            Category::Veg(VegCategory::Pappu) => "Pappu",
            Category::Veg(VegCategory::Curry) => "Curry",
            Category::Veg(VegCategory::Fry) => "Fry",
            Category::Veg(VegCategory::Pickle) => "Pickle",
            Category::NonVeg(NonVegCategory::Starters) => "Starters",
            Category::NonVeg(NonVegCategory::Gravy) => "Gravy",
            Category::NonVeg(NonVegCategory::Fry) => "Fry",
            Category::NonVeg(NonVegCategory::Biryani) => "Biryani",
        }
    }

    /// Dishes offered by the constrained-select variant. Empty means any text.
    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            Category::Veg(VegCategory::WelcomeDrinks) | Category::Veg(VegCategory::Snacks) => &[],
            Category::Veg(VegCategory::Sweets) => catalog::VEG_SWEETS,
            Category::Veg(VegCategory::HotItems) => catalog::VEG_HOT_ITEMS,
            Category::Veg(VegCategory::Pappu) => catalog::VEG_PAPPU,
            Category::Veg(VegCategory::Curry) => catalog::VEG_CURRY,
            Category::Veg(VegCategory::Fry) => catalog::VEG_FRY,
            Category::Veg(VegCategory::Pickle) => catalog::VEG_PICKLES,
            Category::NonVeg(NonVegCategory::Starters) => catalog::NON_VEG_STARTERS,
            Category::NonVeg(NonVegCategory::Gravy) => catalog::NON_VEG_GRAVY,
            Category::NonVeg(NonVegCategory::Fry) => catalog::NON_VEG_FRY,
            Category::NonVeg(NonVegCategory::Biryani) => catalog::NON_VEG_BIRYANI,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses `veg.curry`, `nonVeg.fry`, etc.
impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CoreError::UnknownCategory(s.to_string());
        let (side, key) = s.trim().split_once('.').ok_or_else(unknown)?;
        let quoted = format!("\"{}\"", key);
        match side {
            "veg" => serde_json::from_str::<VegCategory>(&quoted)
                .map(Category::Veg)
                .map_err(|_| unknown()),
            "nonVeg" | "nonveg" => serde_json::from_str::<NonVegCategory>(&quoted)
                .map(Category::NonVeg)
                .map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}

// =============================================================================
// Staples
// =============================================================================

/// Standard side dishes and amenities, in fixed declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Staple {
    Sambar,
    Rasam,
    Curd,
    Biriyani,
    Killi,
    Ghee,
    WaterBottles,
    Dalcha,
    PeruguChutney,
    Pulka,
    ButterNaan,
    RaagiSangati,
}

impl Staple {
    pub const ALL: [Staple; 12] = [
        Staple::Sambar,
        Staple::Rasam,
        Staple::Curd,
        Staple::Biriyani,
        Staple::Killi,
        Staple::Ghee,
        Staple::WaterBottles,
        Staple::Dalcha,
        Staple::PeruguChutney,
        Staple::Pulka,
        Staple::ButterNaan,
        Staple::RaagiSangati,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Staple::Sambar => "Sambar",
            Staple::Rasam => "Rasam",
            Staple::Curd => "Curd",
            Staple::Biriyani => "Biriyani",
            Staple::Killi => "Killi",
            Staple::Ghee => "Ghee",
            Staple::WaterBottles => "Water Bottles",
            Staple::Dalcha => "Dalcha",
            Staple::PeruguChutney => "Perugu Chutney",
            Staple::Pulka => "Pulka",
            Staple::ButterNaan => "Butter Naan",
            Staple::RaagiSangati => "Raagi Sangati",
        }
    }
}

impl FromStr for Staple {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<Staple>(&format!("\"{}\"", s.trim()))
            .map_err(|_| CoreError::UnknownStaple(s.to_string()))
    }
}

// =============================================================================
// List Bound
// =============================================================================

/// Which editor variant governs the category lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListBound {
    /// Free-text entries, at most [`MAX_MENU_ITEMS`] per category.
    #[default]
    FreeText,
    /// At most [`MAX_CONSTRAINED_SELECTIONS`] per category, values from the
    /// category vocabulary or the `"Other"` placeholder (later overridden).
    Constrained,
}

impl ListBound {
    pub const fn max_items(&self) -> usize {
        match self {
            ListBound::FreeText => MAX_MENU_ITEMS,
            ListBound::Constrained => MAX_CONSTRAINED_SELECTIONS,
        }
    }
}

/// True when an entry should be displayed.
pub fn is_visible(item: &str) -> bool {
    let item = item.trim();
    !item.is_empty() && item != OTHER_SENTINEL
}

// =============================================================================
// Menu Selection
// =============================================================================

/// Veg and non-veg selections for one quotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSelection {
    bound: ListBound,
    veg: [Vec<String>; 8],
    non_veg: [Vec<String>; 4],
    staples: [bool; 12],
    custom_staples: Vec<String>,
    ice_cream_enabled: bool,
    flavors: Vec<String>,
}

impl MenuSelection {
    /// Empty free-text menu.
    pub fn new() -> Self {
        MenuSelection::default()
    }

    /// Empty menu governed by `bound`.
    pub fn with_bound(bound: ListBound) -> Self {
        MenuSelection {
            bound,
            ..MenuSelection::default()
        }
    }

    pub fn bound(&self) -> ListBound {
        self.bound
    }

    fn list(&self, category: Category) -> &Vec<String> {
        match category {
            Category::Veg(c) => &self.veg[c as usize],
            Category::NonVeg(c) => &self.non_veg[c as usize],
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Veg(c) => &mut self.veg[c as usize],
            Category::NonVeg(c) => &mut self.non_veg[c as usize],
        }
    }

    fn accepts(&self, category: Category, text: &str) -> bool {
        match self.bound {
            ListBound::FreeText => true,
            ListBound::Constrained => {
                let vocabulary = category.vocabulary();
                text == OTHER_SENTINEL
                    || vocabulary.is_empty()
                    || catalog::contains(vocabulary, text)
            }
        }
    }

    // ===== Category lists =====

    /// Adds an item to a category.
    ///
    /// ## Returns
    /// `false` (and changes nothing) when the text is blank, the list is full,
    /// or the constrained variant rejects the value.
    pub fn add_item(&mut self, category: Category, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.list(category).len() >= self.bound.max_items() {
            return false;
        }
        if !self.accepts(category, text) {
            return false;
        }
        if self.duplicates_selection(category, text, None) {
            return false;
        }
        self.list_mut(category).push(text.to_string());
        true
    }

    /// Removes the item at `index`, returning it.
    pub fn remove_item(&mut self, category: Category, index: usize) -> Option<String> {
        let list = self.list_mut(category);
        (index < list.len()).then(|| list.remove(index))
    }

    /// Replaces the item at `index`.
    ///
    /// Free-text lists accept anything (blank entries are simply not shown).
    /// Constrained lists accept vocabulary values, or any text when the slot
    /// currently holds the `"Other"` placeholder, but never a value already
    /// selected in another slot.
    pub fn update_item(&mut self, category: Category, index: usize, text: &str) -> bool {
        let text = text.trim();
        let bound = self.bound;
        let allowed = match self.list(category).get(index) {
            None => return false,
            Some(current) => {
                bound == ListBound::FreeText
                    || current.trim() == OTHER_SENTINEL
                    || self.accepts(category, text)
            }
        };
        if !allowed || self.duplicates_selection(category, text, Some(index)) {
            return false;
        }
        self.list_mut(category)[index] = text.to_string();
        true
    }

    /// Constrained lists hold each real selection once; `skip` is the slot
    /// being overwritten.
    fn duplicates_selection(&self, category: Category, text: &str, skip: Option<usize>) -> bool {
        self.bound == ListBound::Constrained
            && text != OTHER_SENTINEL
            && self
                .list(category)
                .iter()
                .enumerate()
                .any(|(i, item)| Some(i) != skip && item.trim().eq_ignore_ascii_case(text))
    }

    /// Raw entries, including blanks and placeholders.
    pub fn items(&self, category: Category) -> &[String] {
        self.list(category)
    }

    /// Entries that should be displayed: trimmed, without blanks or `"Other"`.
    pub fn visible_items(&self, category: Category) -> Vec<&str> {
        self.list(category)
            .iter()
            .map(|i| i.trim())
            .filter(|i| is_visible(i))
            .collect()
    }

    // ===== Staples =====

    /// Flips one staple flag.
    pub fn toggle_staple(&mut self, staple: Staple) {
        let flag = &mut self.staples[staple as usize];
        *flag = !*flag;
    }

    pub fn is_staple_selected(&self, staple: Staple) -> bool {
        self.staples[staple as usize]
    }

    /// Adds a free-text staple shown after the fixed ones.
    pub fn add_custom_staple(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.custom_staples.push(text.to_string());
        true
    }

    pub fn remove_custom_staple(&mut self, index: usize) -> Option<String> {
        (index < self.custom_staples.len()).then(|| self.custom_staples.remove(index))
    }

    /// Labels of selected staples, comma-joined.
    ///
    /// Fixed staples come in declaration order regardless of the order they
    /// were toggled in; custom staples follow in insertion order.
    ///
    /// ## Example
    /// ```rust
    /// use taraang_core::menu::{MenuSelection, Staple};
    ///
    /// let mut menu = MenuSelection::new();
    /// menu.toggle_staple(Staple::Curd);
    /// menu.toggle_staple(Staple::Sambar);
    /// menu.add_custom_staple("Papad");
    /// assert_eq!(menu.selected_staple_labels(), "Sambar, Curd, Papad");
    /// ```
    pub fn selected_staple_labels(&self) -> String {
        Staple::ALL
            .iter()
            .filter(|s| self.is_staple_selected(**s))
            .map(|s| s.label())
            .chain(
                self.custom_staples
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| is_visible(s)),
            )
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ===== Ice cream =====

    pub fn set_ice_cream_enabled(&mut self, enabled: bool) {
        self.ice_cream_enabled = enabled;
    }

    pub fn ice_cream_enabled(&self) -> bool {
        self.ice_cream_enabled
    }

    /// Adds a flavour. No-op while ice cream is disabled.
    pub fn add_flavor(&mut self, text: &str) -> bool {
        let text = text.trim();
        if !self.ice_cream_enabled || text.is_empty() || self.flavors.len() >= MAX_MENU_ITEMS {
            return false;
        }
        self.flavors.push(text.to_string());
        true
    }

    /// Removes a flavour. No-op while ice cream is disabled.
    pub fn remove_flavor(&mut self, index: usize) -> Option<String> {
        if !self.ice_cream_enabled || index >= self.flavors.len() {
            return None;
        }
        Some(self.flavors.remove(index))
    }

    /// Replaces a flavour. No-op while ice cream is disabled.
    pub fn update_flavor(&mut self, index: usize, text: &str) -> bool {
        if !self.ice_cream_enabled {
            return false;
        }
        match self.flavors.get_mut(index) {
            Some(slot) => {
                *slot = text.trim().to_string();
                true
            }
            None => false,
        }
    }

    /// Flavours that should be displayed.
    pub fn visible_flavors(&self) -> Vec<&str> {
        self.flavors
            .iter()
            .map(|f| f.trim())
            .filter(|f| is_visible(f))
            .collect()
    }

    /// What the Ice Cream line shows: `None` when disabled, the flavours when
    /// any are visible, otherwise `"Yes"`.
    pub fn ice_cream_display(&self) -> Option<String> {
        if !self.ice_cream_enabled {
            return None;
        }
        let flavors = self.visible_flavors();
        if flavors.is_empty() {
            Some("Yes".to_string())
        } else {
            Some(flavors.join(", "))
        }
    }

    // ===== Panels =====

    /// True when the veg panel has anything to show.
    pub fn has_veg_content(&self) -> bool {
        VegCategory::ALL
            .iter()
            .any(|c| !self.visible_items(Category::Veg(*c)).is_empty())
            || !self.selected_staple_labels().is_empty()
            || self.ice_cream_enabled
    }

    /// True when the non-veg panel has anything to show.
    pub fn has_non_veg_content(&self) -> bool {
        NonVegCategory::ALL
            .iter()
            .any(|c| !self.visible_items(Category::NonVeg(*c)).is_empty())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
