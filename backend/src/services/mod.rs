//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between repositories, such as seeding a new
//! group or issuing invites.

pub mod group_service;
pub mod invite_service;
