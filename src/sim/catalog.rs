//! Block type catalog
//!
//! Static configuration loaded once at startup: the block types (id, color,
//! localized names) and the recipe table. Everything is validated on load so
//! a broken catalog stops the game before the first block is placed.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::recipe::RecipeTable;

/// Catalog bundled with the game
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Catalog load/validation failures
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog defines no block types")]
    Empty,

    #[error("block type `{0}` is defined more than once")]
    DuplicateType(String),

    #[error("recipe ({a}, {b}) is defined more than once (`{first}` and `{second}`)")]
    DuplicateRecipe {
        a: String,
        b: String,
        first: String,
        second: String,
    },

    #[error("recipe input `{0}` is not a known block type")]
    UnknownRecipeInput(String),

    #[error("recipe result `{0}` is not a known block type")]
    UnknownRecipeResult(String),
}

/// A kind of block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockType {
    pub id: String,
    /// CSS color used for the block fill
    pub color: String,
    /// Display names keyed by locale code
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

/// Raw recipe entry as written in catalog files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDef {
    pub inputs: [String; 2],
    pub result: String,
}

/// On-disk catalog shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    pub types: Vec<BlockType>,
    #[serde(default)]
    pub recipes: Vec<RecipeDef>,
}

fn default_locale() -> String {
    "en".to_string()
}

/// Validated, read-only catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    default_locale: String,
    /// Types in file order
    types: Vec<BlockType>,
    index: HashMap<String, usize>,
    recipes: RecipeTable,
}

impl Catalog {
    /// Load the catalog shipped in `assets/catalog.json`
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let def: CatalogDef = serde_json::from_str(json)?;
        Self::from_def(def)
    }

    pub fn from_def(def: CatalogDef) -> Result<Self, CatalogError> {
        if def.types.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(def.types.len());
        for (i, ty) in def.types.iter().enumerate() {
            if index.insert(ty.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateType(ty.id.clone()));
            }
        }

        let mut recipes = RecipeTable::new();
        for recipe in &def.recipes {
            for input in &recipe.inputs {
                if !index.contains_key(input) {
                    return Err(CatalogError::UnknownRecipeInput(input.clone()));
                }
            }
            if !index.contains_key(&recipe.result) {
                return Err(CatalogError::UnknownRecipeResult(recipe.result.clone()));
            }
            let [a, b] = &recipe.inputs;
            recipes.insert(a, b, &recipe.result)?;
        }

        log::debug!(
            "Catalog loaded: {} types, {} recipes",
            def.types.len(),
            recipes.len()
        );

        Ok(Self {
            default_locale: def.default_locale,
            types: def.types,
            index,
            recipes,
        })
    }

    pub fn block_type(&self, id: &str) -> Option<&BlockType> {
        self.index.get(id).map(|&i| &self.types[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn color(&self, id: &str) -> Option<&str> {
        self.block_type(id).map(|t| t.color.as_str())
    }

    /// Localized name, falling back to the default locale and then the id
    pub fn display_name<'a>(&'a self, id: &'a str, locale: &str) -> &'a str {
        let Some(ty) = self.block_type(id) else {
            return id;
        };
        ty.names
            .get(locale)
            .or_else(|| ty.names.get(&self.default_locale))
            .map(String::as_str)
            .unwrap_or(ty.id.as_str())
    }

    /// Result of merging two block types, if a recipe exists
    pub fn merge_result(&self, a: &str, b: &str) -> Option<&str> {
        self.recipes.lookup(a, b)
    }

    pub fn recipes(&self) -> &RecipeTable {
        &self.recipes
    }

    pub fn types(&self) -> &[BlockType] {
        &self.types
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }
}
