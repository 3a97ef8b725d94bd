//! # thermopanel-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered HTML fragments** the host UI shell
//!   embeds: status widget, control panel, configuration panel — with
//!   **zero JavaScript** (pure HTML forms, POST + redirect)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses (HTML or JSON errors)
//!
//! ## Wire format
//! Interactive elements carry `data-service`, `data-action`, `data-name`,
//! `data-value`, and `data-incr` attributes, and the enclosing forms carry
//! the same strings as hidden fields. These strings are the contract
//! between the markup and the dispatch layer: they must match the host's
//! service/action vocabulary verbatim or the posted command is rejected.
//!
//! ## Dependency rule
//! Depends on `thermopanel-app` (port trait and services) and
//! `thermopanel-domain` (types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
