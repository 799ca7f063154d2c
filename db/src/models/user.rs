use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

/// Platform-wide account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role_enum")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "parent")]
    Parent,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role_str = match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Admin => "admin",
        };
        write!(f, "{}", role_str)
    }
}

/// Schooling tier for users and courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "edu_level_enum")]
#[serde(rename_all = "lowercase")]
pub enum EduLevel {
    #[sea_orm(string_value = "kindergarten")]
    Kindergarten,
    #[sea_orm(string_value = "primary")]
    Primary,
    #[sea_orm(string_value = "secondary")]
    Secondary,
    #[sea_orm(string_value = "undergrad")]
    Undergrad,
    #[sea_orm(string_value = "postgrad")]
    Postgrad,
}

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User's unique email address.
    pub email: String,
    /// Securely hashed password string. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role deciding route-level access.
    pub role: Role,
    pub name: Option<String>,
    pub profile_picture_path: Option<String>,
    /// Educational stage (level, grade) pair; both optional.
    pub edu_level: Option<EduLevel>,
    pub edu_grade: Option<String>,
    /// Consecutive-activity counter, bumped on submissions and tracking.
    pub activity_streak: i32,
    /// Timestamp of the last authenticated action.
    pub last_active: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Hashes a plaintext password with a fresh salt.
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// Constant-time comparison of a plaintext password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Creates a new user with a hashed password.
    pub async fn create(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
        role: Role,
        name: Option<String>,
        edu_level: Option<EduLevel>,
        edu_grade: Option<String>,
    ) -> Result<Model, DbErr> {
        let password_hash = Self::hash_password(password)
            .map_err(|e| DbErr::Custom(format!("Failed to hash password: {e}")))?;
        let now = Utc::now();

        let user = ActiveModel {
            id: NotSet,
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            role: Set(role),
            name: Set(name),
            profile_picture_path: Set(None),
            edu_level: Set(edu_level),
            edu_grade: Set(edu_grade),
            activity_streak: Set(0),
            last_active: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(db).await
    }

    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    /// Number of admin accounts currently in the system.
    pub async fn admin_count(db: &impl ConnectionTrait) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::Role.eq(Role::Admin))
            .count(db)
            .await
    }

    /// Refreshes `last_active` without touching the streak.
    pub async fn touch_last_active(db: &DatabaseConnection, user_id: i64) -> Result<(), DbErr> {
        Entity::update_many()
            .col_expr(Column::LastActive, Expr::value(Utc::now()))
            .filter(Column::Id.eq(user_id))
            .exec(db)
            .await?;
        Ok(())
    }

    /// Atomically increments the activity streak and refreshes `last_active`.
    pub async fn bump_activity(db: &DatabaseConnection, user_id: i64) -> Result<(), DbErr> {
        Entity::update_many()
            .col_expr(
                Column::ActivityStreak,
                Expr::col(Column::ActivityStreak).add(1),
            )
            .col_expr(Column::LastActive, Expr::value(Utc::now()))
            .filter(Column::Id.eq(user_id))
            .exec(db)
            .await?;
        Ok(())
    }

    /// Whether the streak has lapsed: more than 24 hours since the last action.
    pub fn streak_lapsed(&self, now: DateTime<Utc>) -> bool {
        match self.last_active {
            Some(last) => now - last > Duration::hours(24),
            None => false,
        }
    }
}
