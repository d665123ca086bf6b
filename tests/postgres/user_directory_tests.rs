//! User directory tests against `PostgreSQL`.

use super::helpers::{TestDatabase, at, register, test_runtime};
use eyre::{ensure, eyre};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use taskwarden::identity::{
    domain::{EmailAddress, Role, User, UserId, UserName},
    ports::{UserDirectory, UserDirectoryError},
};

#[rstest]
fn stored_user_round_trips(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "users")?;
    let users = db.users();
    let rt = test_runtime()?;

    let carol = rt.block_on(register(&users, "Carol", "carol@example.com", Role::Manager))?;
    let loaded = rt
        .block_on(users.find_by_id(carol.id()))?
        .ok_or_else(|| eyre!("stored user not found"))?;

    ensure!(loaded.name().as_str() == "Carol");
    ensure!(loaded.email().as_str() == "carol@example.com");
    ensure!(loaded.role() == Role::Manager);
    ensure!(loaded.created_at() == at(2026, 1, 1)?);
    ensure!(rt.block_on(users.count())? == 1);
    Ok(())
}

#[rstest]
fn second_user_with_same_email_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "users_duplicate")?;
    let users = db.users();
    let rt = test_runtime()?;
    rt.block_on(register(&users, "Carol", "carol@example.com", Role::User))?;
    let impostor = User::from_persisted(
        UserId::new(),
        UserName::new("Other Carol")?,
        EmailAddress::new("Carol@Example.com")?,
        Role::Admin,
        at(2026, 2, 1)?,
    );

    let result = rt.block_on(users.store(&impostor));

    ensure!(
        matches!(&result, Err(UserDirectoryError::DuplicateEmail(email)) if email.as_str() == "carol@example.com"),
        "expected DuplicateEmail, got {result:?}"
    );
    ensure!(rt.block_on(users.count())? == 1);
    Ok(())
}

#[rstest]
fn unknown_user_is_absent(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "users_unknown")?;
    let users = db.users();
    let rt = test_runtime()?;

    ensure!(rt.block_on(users.find_by_id(UserId::new()))?.is_none());
    ensure!(rt.block_on(users.count())? == 0);
    Ok(())
}
