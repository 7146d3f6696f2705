//! Group business logic service.
//!
//! Places a freshly created user into a group: either the group named by an
//! invite, or a brand new one seeded with default categories and wallets.
//! Runs on the caller's connection so it can share the signup transaction.

use crate::database::models::{GroupBootstrap, Invite, User};
use crate::database::seed::{
    DEFAULT_CURRENCY_CODE, DEFAULT_CURRENCY_NAME, DEFAULT_EXPENSE_CATEGORIES,
    DEFAULT_INCOME_CATEGORIES, DEFAULT_WALLETS,
};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::category_repository::CategoryRepository;
use crate::repositories::currency_repository::CurrencyRepository;
use crate::repositories::group_repository::GroupRepository;
use crate::repositories::invite_repository::InviteRepository;
use crate::repositories::wallet_repository::WalletRepository;
use sqlx::SqliteConnection;

pub struct GroupService<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> GroupService<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Redeems `invite_code` for `user`.
    ///
    /// # Errors
    /// `ServiceError::InvalidInvite` if the code does not exist or was
    /// redeemed by someone else in the meantime.
    pub async fn join_by_invite(&mut self, user: &User, invite_code: &str) -> ServiceResult<Invite> {
        let mut invites = InviteRepository::new(&mut *self.conn);

        let invite = invites
            .get_invite_by_code(invite_code)
            .await?
            .ok_or_else(|| {
                tracing::warn!("User {} presented an unknown invite code", user.id);
                ServiceError::InvalidInvite
            })?;

        if !invites.delete_invite(&invite.id).await? {
            tracing::warn!("Invite {} was redeemed concurrently", invite.id);
            return Err(ServiceError::InvalidInvite);
        }

        GroupRepository::new(&mut *self.conn)
            .add_member(&invite.group_id, &user.id)
            .await?;

        tracing::info!("User {} joined group {} by invite", user.id, invite.group_id);
        Ok(invite)
    }

    /// Creates a new group for `user` with the default currency, categories
    /// and wallets, all attributed to that user.
    pub async fn bootstrap(&mut self, user: &User) -> ServiceResult<GroupBootstrap> {
        let mut groups = GroupRepository::new(&mut *self.conn);
        let group = groups.create_group().await?;
        groups.add_member(&group.id, &user.id).await?;

        let currency = CurrencyRepository::new(&mut *self.conn)
            .get_or_create(DEFAULT_CURRENCY_CODE, DEFAULT_CURRENCY_NAME)
            .await?;

        let mut categories = CategoryRepository::new(&mut *self.conn);
        let expense_categories = categories
            .bulk_create_expense_categories(&group.id, &user.id, DEFAULT_EXPENSE_CATEGORIES)
            .await?;
        let income_categories = categories
            .bulk_create_income_categories(&group.id, &user.id, DEFAULT_INCOME_CATEGORIES)
            .await?;

        let wallets = WalletRepository::new(&mut *self.conn)
            .bulk_create_wallets(&group.id, &currency.id, &user.id, DEFAULT_WALLETS)
            .await?;

        tracing::info!(
            "Bootstrapped group {} with {} expense categories, {} income categories and {} wallets",
            group.id,
            expense_categories.len(),
            income_categories.len(),
            wallets.len()
        );

        Ok(GroupBootstrap {
            group,
            currency,
            expense_categories,
            income_categories,
            wallets,
        })
    }
}
