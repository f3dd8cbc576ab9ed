//! Target references and their persistence descriptors.
//!
//! A target names the content entity that receives an edited image. The
//! resolver turns it into a [`PersistOp`] without doing any I/O; the
//! [`crate::persist::ImageStore`] implementation carries it out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which content entity an edited image is attached to.
///
/// The serialized `kind` uses the same names as the `kind:id` string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum TargetReference {
    /// The site configuration's logo.
    Logo,
    /// The site configuration's hero background.
    Hero,
    /// A collection's cover image.
    Collection(String),
    /// A jewelry item's photo.
    #[serde(rename = "item")]
    JewelryItem(String),
}

/// A target reference that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTargetError {
    #[error("Empty target reference")]
    Empty,

    #[error("Unknown target kind: {0:?}")]
    UnknownKind(String),

    #[error("Missing id for {0} target")]
    MissingId(&'static str),
}

/// The entity a persistence operation writes to.
///
/// Names follow the content backend's entity types, not the editor's
/// target kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "entity", content = "id", rename_all = "camelCase")]
pub enum EntityRef {
    SiteConfig,
    Collection(String),
    JewelryItem(String),
}

impl EntityRef {
    /// Backend entity type name, as serialized in `entity`.
    pub fn kind(&self) -> &'static str {
        match self {
            EntityRef::SiteConfig => "siteConfig",
            EntityRef::Collection(_) => "collection",
            EntityRef::JewelryItem(_) => "jewelryItem",
        }
    }

    /// Entity id, absent for the site configuration.
    pub fn id(&self) -> Option<&str> {
        match self {
            EntityRef::SiteConfig => None,
            EntityRef::Collection(id) | EntityRef::JewelryItem(id) => Some(id),
        }
    }
}

/// The image field written on the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImageField {
    #[serde(rename = "logo_base64")]
    Logo,
    #[serde(rename = "hero_image_base64")]
    HeroImage,
    #[serde(rename = "image_base64")]
    Image,
}

impl ImageField {
    /// Field name as stored by the content backend.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageField::Logo => "logo_base64",
            ImageField::HeroImage => "hero_image_base64",
            ImageField::Image => "image_base64",
        }
    }
}

/// Persistence operation descriptor: which field of which entity to update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PersistOp {
    pub entity: EntityRef,
    pub field: ImageField,
}

impl fmt::Display for PersistOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity {
            EntityRef::SiteConfig => write!(f, "update site config field {}", self.field.as_str()),
            EntityRef::Collection(id) => write!(f, "attach image to collection {}", id),
            EntityRef::JewelryItem(id) => write!(f, "attach image to jewelry item {}", id),
        }
    }
}

/// Map a target reference to its persistence operation.
///
/// Collection and item targets must carry a non-blank id; there is no
/// fallback target.
pub fn resolve(target: &TargetReference) -> Result<PersistOp, InvalidTargetError> {
    let op = match target {
        TargetReference::Logo => PersistOp {
            entity: EntityRef::SiteConfig,
            field: ImageField::Logo,
        },
        TargetReference::Hero => PersistOp {
            entity: EntityRef::SiteConfig,
            field: ImageField::HeroImage,
        },
        TargetReference::Collection(id) => PersistOp {
            entity: EntityRef::Collection(non_blank(id, "collection")?),
            field: ImageField::Image,
        },
        TargetReference::JewelryItem(id) => PersistOp {
            entity: EntityRef::JewelryItem(non_blank(id, "jewelry item")?),
            field: ImageField::Image,
        },
    };
    Ok(op)
}

fn non_blank(id: &str, kind: &'static str) -> Result<String, InvalidTargetError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(InvalidTargetError::MissingId(kind));
    }
    Ok(id.to_string())
}

impl FromStr for TargetReference {
    type Err = InvalidTargetError;

    /// Parse `logo`, `hero`, `collection:<id>` or `item:<id>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidTargetError::Empty);
        }

        let (kind, id) = match s.split_once(':') {
            Some((kind, id)) => (kind, Some(id)),
            None => (s, None),
        };

        match (kind, id) {
            ("logo", None) => Ok(TargetReference::Logo),
            ("hero", None) => Ok(TargetReference::Hero),
            ("collection", Some(id)) => {
                Ok(TargetReference::Collection(non_blank(id, "collection")?))
            }
            ("collection", None) => Err(InvalidTargetError::MissingId("collection")),
            ("item", Some(id)) => Ok(TargetReference::JewelryItem(non_blank(id, "jewelry item")?)),
            ("item", None) => Err(InvalidTargetError::MissingId("jewelry item")),
            _ => Err(InvalidTargetError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for TargetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetReference::Logo => f.write_str("logo"),
            TargetReference::Hero => f.write_str("hero"),
            TargetReference::Collection(id) => write!(f, "collection:{}", id),
            TargetReference::JewelryItem(id) => write!(f, "item:{}", id),
        }
    }
}
