use core::str::FromStr;
use std::fmt;

use nutype::nutype;
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// encapsulate the UUIDs in custom struct to let the compiler differentiate
/// them
macro_rules! impl_id_encapsulation {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            id: Uuid,
        }

        impl $name {
            pub fn new_random() -> Self { $name { id: Uuid::new_v4() } }
        }

        impl From<Uuid> for $name {
            #[inline(always)]
            fn from(id: Uuid) -> Self { $name { id } }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            #[inline(always)]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::from_str(s).map(|id| id.into())
            }
        }

        impl fmt::Display for $name {
            #[inline(always)]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.id)
            }
        }

        impl Serialize for $name {
            #[inline(always)]
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.id.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct MyVisitor;

                impl<'de> Visitor<'de> for MyVisitor {
                    type Value = $name;

                    fn expecting(
                        &self,
                        formatter: &mut fmt::Formatter,
                    ) -> fmt::Result {
                        formatter.write_str(
                            format!("a {}, i.e., a UUID", stringify!($name))
                                .as_str(),
                        )
                    }

                    fn visit_str<E>(
                        self,
                        value: &str,
                    ) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        Ok($name {
                            id: Uuid::parse_str(value).map_err(E::custom)?,
                        })
                    }
                }

                deserializer.deserialize_str(MyVisitor)
            }
        }
    };
}

impl_id_encapsulation!(PledgeId);
impl_id_encapsulation!(UserId);

/// Opaque identifier of an artwork in the catalog.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 128),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        Display,
        AsRef,
        Serialize,
        Deserialize
    )
)]
pub struct ArtworkId(String);

pub mod domain;
pub mod dto;
pub mod view;
