use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QuerySelect,
    Select, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::users::{ProductRef, RecentlyViewedList, UserProfile, WishlistView},
    entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::product_service::product_exists,
};

pub async fn me(db: &OrmConn, user: &AuthUser) -> AppResult<ApiResponse<UserProfile>> {
    let model = find_user(db, user).await?;
    Ok(ApiResponse::success(
        "Profile",
        profile_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn record_view(
    db: &OrmConn,
    user: &AuthUser,
    payload: ProductRef,
) -> AppResult<ApiResponse<RecentlyViewedList>> {
    ensure_product(db, payload.product_id).await?;
    let txn = db.begin().await?;
    let model = lock_user(&txn, user).await?;

    let mut recently_viewed = model.recently_viewed.clone();
    recently_viewed.record(payload.product_id, Utc::now());

    let mut active: ActiveModel = model.into();
    active.recently_viewed = Set(recently_viewed);
    active.updated_at = Set(Utc::now().fixed_offset());
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Recently viewed updated",
        RecentlyViewedList {
            items: updated.recently_viewed.0,
        },
        Some(Meta::empty()),
    ))
}

pub async fn add_to_wishlist(
    db: &OrmConn,
    user: &AuthUser,
    payload: ProductRef,
) -> AppResult<ApiResponse<WishlistView>> {
    ensure_product(db, payload.product_id).await?;
    let txn = db.begin().await?;
    let model = lock_user(&txn, user).await?;

    let mut wishlist = model.wishlist.clone();
    if !wishlist.add(payload.product_id, Utc::now()) {
        return Ok(ApiResponse::success(
            "Already in wishlist",
            WishlistView { items: wishlist.0 },
            Some(Meta::empty()),
        ));
    }

    let mut active: ActiveModel = model.into();
    active.wishlist = Set(wishlist);
    active.updated_at = Set(Utc::now().fixed_offset());
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Added to wishlist",
        WishlistView {
            items: updated.wishlist.0,
        },
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_wishlist(
    db: &OrmConn,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<ApiResponse<WishlistView>> {
    let txn = db.begin().await?;
    let model = lock_user(&txn, user).await?;

    let mut wishlist = model.wishlist.clone();
    if !wishlist.remove(product_id) {
        return Err(AppError::not_found("Wishlist item", product_id.to_string()));
    }

    let mut active: ActiveModel = model.into();
    active.wishlist = Set(wishlist);
    active.updated_at = Set(Utc::now().fixed_offset());
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Removed from wishlist",
        WishlistView {
            items: updated.wishlist.0,
        },
        Some(Meta::empty()),
    ))
}

fn user_by_identity(user: &AuthUser) -> Select<Users> {
    Users::find().filter(Column::Auth0Id.eq(user.auth0_id.clone()))
}

async fn find_user(db: &OrmConn, user: &AuthUser) -> AppResult<UserModel> {
    user_by_identity(user)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("User", user.auth0_id.clone()))
}

/// Row-locks the user until `txn` ends so concurrent list edits serialize.
async fn lock_user(txn: &DatabaseTransaction, user: &AuthUser) -> AppResult<UserModel> {
    user_by_identity(user)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| AppError::not_found("User", user.auth0_id.clone()))
}

async fn ensure_product(db: &OrmConn, product_id: Uuid) -> AppResult<()> {
    if !product_exists(db, product_id).await? {
        return Err(AppError::not_found("Product", product_id.to_string()));
    }
    Ok(())
}

fn profile_from_entity(model: UserModel) -> UserProfile {
    UserProfile {
        id: model.id,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        role: model.role,
        preferences: model.preferences,
        wishlist: model.wishlist.0,
        recently_viewed: model.recently_viewed.0,
    }
}
