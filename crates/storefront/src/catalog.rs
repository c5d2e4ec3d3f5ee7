//! Product catalog.
//!
//! The catalog is a fixed in-process list; products are not persisted.
//! Cart lines and order items snapshot what they need from a product,
//! so editing the catalog never rewrites history.

use rust_decimal::{Decimal, dec};
use serde::{Deserialize, Serialize};

use merchstand_core::ProductId;

/// Number of products shown on the landing page.
const FEATURED_COUNT: usize = 6;

/// Number of products suggested next to a product page.
const RELATED_COUNT: usize = 4;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anime,
    Movies,
    Memes,
}

impl Category {
    /// The wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Movies => "movies",
            Self::Memes => "memes",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anime" => Ok(Self::Anime),
            "movies" => Ok(Self::Movies),
            "memes" => Ok(Self::Memes),
            _ => Err(UnknownCategoryError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Error for a category name that is not in the catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category `{value}`; must be one of: anime, movies, memes")]
pub struct UnknownCategoryError {
    pub value: String,
}

/// A sellable product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub category: Category,
    pub image: String,
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Product {
    /// Whether the product is currently discounted.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.original_price > self.price
    }
}

/// How to order filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PriceLowToHigh,
    PriceHighToLow,
    NameAsc,
    NameDesc,
}

/// Criteria for [`Catalog::search`]. The default filter matches
/// everything in catalog order.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match against the product name.
    pub search: Option<String>,
    /// Keep products in any of these categories; empty means all.
    pub categories: Vec<Category>,
    /// Keep products priced at or below this amount.
    pub max_price: Option<Decimal>,
    pub sort: Option<SortKey>,
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The stock Merchstand catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_products())
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The products featured on the landing page: the first six in
    /// catalog order.
    #[must_use]
    pub fn featured(&self) -> &[Product] {
        let count = self.products.len().min(FEATURED_COUNT);
        self.products.get(..count).unwrap_or_default()
    }

    /// Up to four products in the same category as `id`, excluding the
    /// product itself.
    #[must_use]
    pub fn related(&self, id: ProductId) -> Vec<&Product> {
        let Some(current) = self.get(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.id != id && p.category == current.category)
            .take(RELATED_COUNT)
            .collect()
    }

    /// Apply `filter` and return matching products.
    #[must_use]
    pub fn search(&self, filter: &ProductFilter) -> Vec<&Product> {
        let needle = filter.search.as_deref().map(str::to_lowercase);

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                let matches_search = needle
                    .as_deref()
                    .is_none_or(|term| p.name.to_lowercase().contains(term));
                let matches_category =
                    filter.categories.is_empty() || filter.categories.contains(&p.category);
                let matches_price = filter.max_price.is_none_or(|max| p.price <= max);
                matches_search && matches_category && matches_price
            })
            .collect();

        match filter.sort {
            Some(SortKey::PriceLowToHigh) => matches.sort_by(|a, b| a.price.cmp(&b.price)),
            Some(SortKey::PriceHighToLow) => matches.sort_by(|a, b| b.price.cmp(&a.price)),
            Some(SortKey::NameAsc) => matches.sort_by(|a, b| a.name.cmp(&b.name)),
            Some(SortKey::NameDesc) => matches.sort_by(|a, b| b.name.cmp(&a.name)),
            None => {}
        }

        matches
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_products() -> Vec<Product> {
    let apparel_sizes = || vec!["S".to_owned(), "M".to_owned(), "L".to_owned(), "XL".to_owned()];
    let one_size = || vec!["One Size".to_owned()];
    let colors = |names: &[&str]| names.iter().map(|&c| c.to_owned()).collect();

    vec![
        Product {
            id: ProductId::new(1),
            name: "Anime T-Shirt".to_owned(),
            price: dec!(29.99),
            original_price: dec!(39.99),
            category: Category::Anime,
            image: "img/Anime_T.png".to_owned(),
            sizes: apparel_sizes(),
            colors: colors(&["Black", "White", "Navy", "Gray"]),
        },
        Product {
            id: ProductId::new(2),
            name: "Movie Poster".to_owned(),
            price: dec!(19.99),
            original_price: dec!(24.99),
            category: Category::Movies,
            image: "img/Movie_Poster.png".to_owned(),
            sizes: one_size(),
            colors: Vec::new(),
        },
        Product {
            id: ProductId::new(3),
            name: "Meme Bag".to_owned(),
            price: dec!(14.99),
            original_price: dec!(19.99),
            category: Category::Memes,
            image: "img/meme_mugbag.png".to_owned(),
            sizes: one_size(),
            colors: Vec::new(),
        },
        Product {
            id: ProductId::new(5),
            name: "Anime Hoodie".to_owned(),
            price: dec!(49.99),
            original_price: dec!(59.99),
            category: Category::Anime,
            image: "img/Anime_hoodie.png".to_owned(),
            sizes: apparel_sizes(),
            colors: Vec::new(),
        },
        Product {
            id: ProductId::new(6),
            name: "Meme Mug".to_owned(),
            price: dec!(14.99),
            original_price: dec!(19.99),
            category: Category::Memes,
            image: "img/Meme_mug.png".to_owned(),
            sizes: one_size(),
            colors: Vec::new(),
        },
        Product {
            id: ProductId::new(7),
            name: "Meme Sticker Pack".to_owned(),
            price: dec!(9.99),
            original_price: dec!(14.99),
            category: Category::Memes,
            image: "img/Meme_stickers.png".to_owned(),
            sizes: one_size(),
            colors: Vec::new(),
        },
        Product {
            id: ProductId::new(10),
            name: "Movie Blu-ray".to_owned(),
            price: dec!(24.99),
            original_price: dec!(29.99),
            category: Category::Movies,
            image: "img/Movie_2.png".to_owned(),
            sizes: one_size(),
            colors: Vec::new(),
        },
        Product {
            id: ProductId::new(11),
            name: "Meme T-Shirt".to_owned(),
            price: dec!(27.99),
            original_price: dec!(37.99),
            category: Category::Memes,
            image: "img/meme_T.png".to_owned(),
            sizes: apparel_sizes(),
            colors: colors(&["Black", "White", "Red", "Blue"]),
        },
    ]
}
