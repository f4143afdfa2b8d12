//! Page-builder module content carried by grid items.
//!
//! The layout engine is generic over item content and never looks inside it.
//! [`ModuleContent`] is the concrete union the profile page builder stores;
//! only rendering and editing code dispatches on its variants.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::insert::InsertOutcome;
use crate::model::GridDocument;

/// Discriminant of [`ModuleContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    RichText,
    TagList,
    Image,
    Divider,
    MiniCard,
    Grid,
}

/// Content of one layout module, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModuleContent {
    RichText {
        #[serde(default)]
        html: String,
    },
    TagList {
        #[serde(default)]
        tags: Vec<String>,
    },
    Image {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        alt: String,
    },
    Divider,
    MiniCard {
        #[serde(default)]
        title: String,
        #[serde(default)]
        body: String,
        #[serde(default)]
        icon: Option<String>,
    },
    Grid(GridDocument<ModuleContent>),
}

impl ModuleContent {
    #[must_use]
    pub const fn kind(&self) -> ModuleKind {
        match self {
            Self::RichText { .. } => ModuleKind::RichText,
            Self::TagList { .. } => ModuleKind::TagList,
            Self::Image { .. } => ModuleKind::Image,
            Self::Divider => ModuleKind::Divider,
            Self::MiniCard { .. } => ModuleKind::MiniCard,
            Self::Grid(_) => ModuleKind::Grid,
        }
    }

    /// The nested grid, if this module is one.
    pub fn as_grid_mut(&mut self) -> Option<&mut GridDocument<ModuleContent>> {
        match self {
            Self::Grid(grid) => Some(grid),
            _ => None,
        }
    }
}

/// Produces the starting content for a newly added module.
pub trait ContentFactory<C> {
    fn create_default(&self, kind: ModuleKind) -> C;
}

/// Empty content for every module kind; nested grids start as 2 × 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContentFactory;

impl ContentFactory<ModuleContent> for DefaultContentFactory {
    fn create_default(&self, kind: ModuleKind) -> ModuleContent {
        match kind {
            ModuleKind::RichText => ModuleContent::RichText {
                html: String::new(),
            },
            ModuleKind::TagList => ModuleContent::TagList { tags: Vec::new() },
            ModuleKind::Image => ModuleContent::Image {
                url: None,
                alt: String::new(),
            },
            ModuleKind::Divider => ModuleContent::Divider,
            ModuleKind::MiniCard => ModuleContent::MiniCard {
                title: String::new(),
                body: String::new(),
                icon: None,
            },
            ModuleKind::Grid => ModuleContent::Grid(GridDocument::new(2, 1)),
        }
    }
}

impl<C> GridDocument<C> {
    /// Add a module of `kind` with factory-made default content.
    pub fn insert_module<F>(&mut self, kind: ModuleKind, factory: &F) -> Result<InsertOutcome>
    where
        F: ContentFactory<C> + ?Sized,
    {
        self.insert(factory.create_default(kind))
    }
}
