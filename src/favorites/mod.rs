//! Saved credit card configurations.
//!
//! Favorites are kept as one JSON array of `{id, name, values}` records under
//! the [`FAVORITES_KEY`] of a [`KeyValueStore`], read and written wholesale.
//!
//! # Example
//!
//! ```
//! use salary_engine::favorites::{Favorites, MemoryStore};
//! use salary_engine::forms::RewardCardForm;
//!
//! let mut store = MemoryStore::new();
//! let mut favorites = Favorites::load(&store).unwrap();
//!
//! let id = favorites.add("Travel card", RewardCardForm::default());
//! favorites.save(&mut store).unwrap();
//!
//! let reloaded = Favorites::load(&store).unwrap();
//! assert_eq!(reloaded.get(id).unwrap().name, "Travel card");
//! ```

mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::forms::RewardCardForm;

/// Store key the favorites array lives under.
pub const FAVORITES_KEY: &str = "creditCardFavorites";

/// A saved credit card configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCard {
    /// Unique identifier.
    pub id: Uuid,
    /// Name given when saving.
    pub name: String,
    /// The form values as entered.
    pub values: RewardCardForm,
}

/// The list of saved cards, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    cards: Vec<FavoriteCard>,
}

impl Favorites {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the favorites from `store`. A store without favorites yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StorageError`] if the store fails or the stored
    /// value is not a valid favorites array.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> EngineResult<Self> {
        let Some(raw) = store.get(FAVORITES_KEY)? else {
            debug!("No saved favorites");
            return Ok(Self::new());
        };

        let cards: Vec<FavoriteCard> = serde_json::from_str(&raw).map_err(|e| {
            warn!("saved favorites are corrupt: {}", e);
            EngineError::StorageError {
                message: format!("invalid favorites data: {}", e),
            }
        })?;

        debug!(count = cards.len(), "Favorites loaded");
        Ok(Self { cards })
    }

    /// Writes the whole list to `store`.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> EngineResult<()> {
        let raw = serde_json::to_string(&self.cards).map_err(|e| EngineError::StorageError {
            message: format!("failed to encode favorites: {}", e),
        })?;
        store.set(FAVORITES_KEY, raw)?;

        debug!(count = self.cards.len(), "Favorites saved");
        Ok(())
    }

    /// Adds a card and returns its new id.
    pub fn add(&mut self, name: impl Into<String>, values: RewardCardForm) -> Uuid {
        let id = Uuid::new_v4();
        self.cards.push(FavoriteCard {
            id,
            name: name.into(),
            values,
        });
        id
    }

    /// Removes the card with `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FavoriteNotFound`] if no card has that id.
    pub fn remove(&mut self, id: Uuid) -> EngineResult<FavoriteCard> {
        let position = self
            .cards
            .iter()
            .position(|card| card.id == id)
            .ok_or_else(|| EngineError::FavoriteNotFound { id: id.to_string() })?;
        Ok(self.cards.remove(position))
    }

    /// Returns the card with `id`.
    pub fn get(&self, id: Uuid) -> Option<&FavoriteCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Iterates over the cards in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FavoriteCard> {
        self.cards.iter()
    }

    /// Number of saved cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
