//! # Repository Module
//!
//! Storage access for the storefront collections.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Store command                                                          │
//! │       │                                                                 │
//! │       │  db.collections().save_cart(&cart)                              │
//! │       ▼                                                                 │
//! │  CollectionRepository   typed: Vec<Product>, Vec<CartItem>, Vec<Coupon> │
//! │  ├── load_* (missing / malformed → defaults)                            │
//! │  └── save_* (empty cart → key removed)                                  │
//! │       │                                                                 │
//! │       │  JSON text                                                      │
//! │       ▼                                                                 │
//! │  KeyValueRepository     untyped: get / set / remove / contains          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv_store table                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KeyValueRepository`](kv::KeyValueRepository) - Raw string values by key
//! - [`CollectionRepository`](collections::CollectionRepository) - Typed collections

pub mod collections;
pub mod kv;
