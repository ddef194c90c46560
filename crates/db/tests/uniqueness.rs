//! The uq_* unique indexes are this service's only concurrency guard;
//! these tests pin down that each one actually rejects a second insert.

use sqlx::PgPool;

fn unique_violation_on(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_team_code_is_rejected(pool: PgPool) {
    sqlx::query("INSERT INTO team_codes (code) VALUES ('abc123xyz')")
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query("INSERT INTO team_codes (code) VALUES ('abc123xyz')")
        .execute(&pool)
        .await
        .unwrap_err();

    assert!(unique_violation_on(&err, "uq_team_codes_code"), "{err}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_team_name_is_rejected_case_insensitively(pool: PgPool) {
    sqlx::query(
        "INSERT INTO teams (team_name, team_email, contact_number) \
         VALUES ('Rustaceans', 'a@example.com', '077')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let err = sqlx::query(
        "INSERT INTO teams (team_name, team_email, contact_number) \
         VALUES ('rustaceans', 'b@example.com', '077')",
    )
    .execute(&pool)
    .await
    .unwrap_err();

    assert!(unique_violation_on(&err, "uq_teams_team_name"), "{err}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_team_email_is_rejected_case_insensitively(pool: PgPool) {
    sqlx::query(
        "INSERT INTO teams (team_name, team_email, contact_number) \
         VALUES ('Alpha', 'Shared@Example.com', '077')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let err = sqlx::query(
        "INSERT INTO teams (team_name, team_email, contact_number) \
         VALUES ('Beta', 'shared@example.com', '077')",
    )
    .execute(&pool)
    .await
    .unwrap_err();

    assert!(unique_violation_on(&err, "uq_teams_team_email"), "{err}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_session_row_per_team_is_rejected(pool: PgPool) {
    sqlx::query("INSERT INTO onboarding_sessions (team_code) VALUES ('abc123xyz')")
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query("INSERT INTO onboarding_sessions (team_code) VALUES ('abc123xyz')")
        .execute(&pool)
        .await
        .unwrap_err();

    assert!(
        unique_violation_on(&err, "uq_onboarding_sessions_team_code"),
        "{err}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_submission_per_team_is_rejected(pool: PgPool) {
    sqlx::query("INSERT INTO submissions (team_code, question_type) VALUES ('abc123xyz', 1)")
        .execute(&pool)
        .await
        .unwrap();

    let err =
        sqlx::query("INSERT INTO submissions (team_code, question_type) VALUES ('abc123xyz', 2)")
            .execute(&pool)
            .await
            .unwrap_err();

    assert!(unique_violation_on(&err, "uq_submissions_team_code"), "{err}");
}
