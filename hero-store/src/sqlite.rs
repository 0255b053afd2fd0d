//! SQLite implementation of [`HeroStore`] on top of an sqlx connection pool.

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use hero_core::{
    Hero, HeroId, HeroPower, HeroPowerId, HeroPowerWithEnds, HeroWithPowers, NewHeroPower, Power,
    PowerDescription, PowerId, PowerWithHeroes, SeedData, Strength,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    FromRow, Sqlite, SqliteConnection, SqlitePool, Transaction,
};
use tracing::{debug, info, instrument};

use crate::{HeroStore, SeedReport, StoreConfig, StoreError};

/// How long a writer waits for the database lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Table definitions, applied idempotently on connect.
const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS heroes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        super_name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS powers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS hero_powers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        strength TEXT NOT NULL CHECK (strength IN ('Weak', 'Average', 'Strong')),
        hero_id INTEGER NOT NULL REFERENCES heroes (id) ON DELETE CASCADE,
        power_id INTEGER NOT NULL REFERENCES powers (id) ON DELETE CASCADE,
        UNIQUE (hero_id, power_id)
    )",
];

// ── Row mapping ───────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct HeroRow {
    id: i64,
    name: String,
    super_name: String,
}

impl From<HeroRow> for Hero {
    fn from(row: HeroRow) -> Self {
        Hero {
            id: HeroId(row.id),
            name: row.name,
            super_name: row.super_name,
        }
    }
}

#[derive(Debug, FromRow)]
struct PowerRow {
    id: i64,
    name: String,
    description: String,
}

impl From<PowerRow> for Power {
    fn from(row: PowerRow) -> Self {
        Power {
            id: PowerId(row.id),
            name: row.name,
            description: row.description,
        }
    }
}

/// An association joined with the power it points at.
#[derive(Debug, FromRow)]
struct PowerLinkRow {
    hp_id: i64,
    strength: String,
    hero_id: i64,
    power_id: i64,
    name: String,
    description: String,
}

/// An association joined with the hero it points at.
#[derive(Debug, FromRow)]
struct HeroLinkRow {
    hp_id: i64,
    strength: String,
    hero_id: i64,
    power_id: i64,
    name: String,
    super_name: String,
}

fn parse_strength(raw: &str) -> Result<Strength, StoreError> {
    raw.parse().map_err(|e: hero_core::CoreError| StoreError::CorruptRow {
        table: "hero_powers",
        reason: e.to_string(),
    })
}

impl PowerLinkRow {
    fn into_parts(self) -> Result<(HeroPower, Power), StoreError> {
        let link = HeroPower {
            id: HeroPowerId(self.hp_id),
            strength: parse_strength(&self.strength)?,
            hero_id: HeroId(self.hero_id),
            power_id: PowerId(self.power_id),
        };
        let power = Power {
            id: PowerId(self.power_id),
            name: self.name,
            description: self.description,
        };
        Ok((link, power))
    }
}

impl HeroLinkRow {
    fn into_parts(self) -> Result<(HeroPower, Hero), StoreError> {
        let link = HeroPower {
            id: HeroPowerId(self.hp_id),
            strength: parse_strength(&self.strength)?,
            hero_id: HeroId(self.hero_id),
            power_id: PowerId(self.power_id),
        };
        let hero = Hero {
            id: HeroId(self.hero_id),
            name: self.name,
            super_name: self.super_name,
        };
        Ok((link, hero))
    }
}

// ── Connection-scoped queries ─────────────────────────────────────────────────

async fn fetch_hero(conn: &mut SqliteConnection, id: HeroId) -> Result<Option<Hero>, StoreError> {
    let row = sqlx::query_as::<_, HeroRow>("SELECT id, name, super_name FROM heroes WHERE id = ?")
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Hero::from))
}

async fn fetch_power(
    conn: &mut SqliteConnection,
    id: PowerId,
) -> Result<Option<Power>, StoreError> {
    let row =
        sqlx::query_as::<_, PowerRow>("SELECT id, name, description FROM powers WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *conn)
            .await?;
    Ok(row.map(Power::from))
}

async fn fetch_hero_with_powers(
    conn: &mut SqliteConnection,
    id: HeroId,
) -> Result<Option<HeroWithPowers>, StoreError> {
    let Some(hero) = fetch_hero(conn, id).await? else {
        return Ok(None);
    };
    let rows = sqlx::query_as::<_, PowerLinkRow>(
        "SELECT hp.id AS hp_id, hp.strength, hp.hero_id, hp.power_id, p.name, p.description
         FROM hero_powers hp
         JOIN powers p ON p.id = hp.power_id
         WHERE hp.hero_id = ?
         ORDER BY hp.id",
    )
    .bind(id.get())
    .fetch_all(&mut *conn)
    .await?;
    let powers = rows
        .into_iter()
        .map(PowerLinkRow::into_parts)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(HeroWithPowers { hero, powers }))
}

async fn fetch_power_with_heroes(
    conn: &mut SqliteConnection,
    id: PowerId,
) -> Result<Option<PowerWithHeroes>, StoreError> {
    let Some(power) = fetch_power(conn, id).await? else {
        return Ok(None);
    };
    let rows = sqlx::query_as::<_, HeroLinkRow>(
        "SELECT hp.id AS hp_id, hp.strength, hp.hero_id, hp.power_id, h.name, h.super_name
         FROM hero_powers hp
         JOIN heroes h ON h.id = hp.hero_id
         WHERE hp.power_id = ?
         ORDER BY hp.id",
    )
    .bind(id.get())
    .fetch_all(&mut *conn)
    .await?;
    let heroes = rows
        .into_iter()
        .map(HeroLinkRow::into_parts)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(PowerWithHeroes { power, heroes }))
}

async fn insert_hero(
    conn: &mut SqliteConnection,
    name: &str,
    super_name: &str,
) -> Result<Hero, StoreError> {
    let row = sqlx::query_as::<_, HeroRow>(
        "INSERT INTO heroes (name, super_name) VALUES (?, ?) RETURNING id, name, super_name",
    )
    .bind(name)
    .bind(super_name)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row.into())
}

async fn insert_power(
    conn: &mut SqliteConnection,
    name: &str,
    description: &str,
) -> Result<Power, StoreError> {
    let row = sqlx::query_as::<_, PowerRow>(
        "INSERT INTO powers (name, description) VALUES (?, ?) RETURNING id, name, description",
    )
    .bind(name)
    .bind(description)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row.into())
}

/// Insert the association, or overwrite the strength of the existing one for
/// the same pair. The existing row keeps its id.
async fn upsert_link(
    conn: &mut SqliteConnection,
    new: NewHeroPower,
) -> Result<HeroPowerId, StoreError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?, ?, ?)
         ON CONFLICT (hero_id, power_id) DO UPDATE SET strength = excluded.strength
         RETURNING id",
    )
    .bind(new.strength.as_str())
    .bind(new.hero_id.get())
    .bind(new.power_id.get())
    .fetch_one(&mut *conn)
    .await?;
    Ok(HeroPowerId(id))
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// [`HeroStore`] backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the pool and make sure the schema exists.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the URL is malformed, the
    /// database cannot be opened, or the schema cannot be applied.
    #[instrument(skip_all, fields(url = %config.url), err)]
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        if !config.is_in_memory() {
            // Readers keep working while a writer holds the lock.
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.is_in_memory() {
            // Dropping the last connection would discard the database.
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!(max_connections = config.max_connections, "store ready");
        Ok(store)
    }

    /// Open a fresh private in-memory store.
    ///
    /// # Errors
    /// See [`SqliteStore::connect`].
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect(&StoreConfig::in_memory()).await
    }

    /// Begin a transaction that holds the write lock from its first
    /// statement. A deferred transaction that has already read cannot
    /// upgrade while another connection writes; it fails with
    /// `SQLITE_BUSY` instead of waiting.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, StoreError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("schema applied");
        Ok(())
    }

    /// Insert a hero directly, bypassing the HTTP surface.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the insert fails.
    pub async fn create_hero(&self, name: &str, super_name: &str) -> Result<Hero, StoreError> {
        let mut conn = self.pool.acquire().await?;
        insert_hero(&mut conn, name, super_name).await
    }

    /// Insert a power directly. The description is not length-checked.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the insert fails.
    pub async fn create_power(&self, name: &str, description: &str) -> Result<Power, StoreError> {
        let mut conn = self.pool.acquire().await?;
        insert_power(&mut conn, name, description).await
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl HeroStore for SqliteStore {
    #[instrument(skip(self), err)]
    async fn list_heroes(&self) -> Result<Vec<Hero>, StoreError> {
        let rows = sqlx::query_as::<_, HeroRow>("SELECT id, name, super_name FROM heroes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Hero::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn hero(&self, id: HeroId) -> Result<Option<HeroWithPowers>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let hero = fetch_hero_with_powers(&mut tx, id).await?;
        tx.commit().await?;
        Ok(hero)
    }

    #[instrument(skip(self), err)]
    async fn list_powers(&self) -> Result<Vec<Power>, StoreError> {
        let rows =
            sqlx::query_as::<_, PowerRow>("SELECT id, name, description FROM powers ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Power::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn power(&self, id: PowerId) -> Result<Option<PowerWithHeroes>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let power = fetch_power_with_heroes(&mut tx, id).await?;
        tx.commit().await?;
        Ok(power)
    }

    #[instrument(skip(self, description), err)]
    async fn update_power_description(
        &self,
        id: PowerId,
        description: &PowerDescription,
    ) -> Result<PowerWithHeroes, StoreError> {
        let mut tx = self.begin_write().await?;
        let result = sqlx::query("UPDATE powers SET description = ? WHERE id = ?")
            .bind(description.as_str())
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::PowerNotFound(id));
        }
        let power = fetch_power_with_heroes(&mut tx, id)
            .await?
            .ok_or(StoreError::PowerNotFound(id))?;
        tx.commit().await?;
        debug!(power_id = %id, "description updated");
        Ok(power)
    }

    #[instrument(skip(self), err)]
    async fn upsert_hero_power(
        &self,
        new: NewHeroPower,
    ) -> Result<HeroPowerWithEnds, StoreError> {
        let mut tx = self.begin_write().await?;
        let hero = fetch_hero(&mut tx, new.hero_id)
            .await?
            .ok_or(StoreError::HeroNotFound(new.hero_id))?;
        let power = fetch_power(&mut tx, new.power_id)
            .await?
            .ok_or(StoreError::PowerNotFound(new.power_id))?;
        let id = upsert_link(&mut tx, new).await?;
        tx.commit().await?;

        debug!(hero_power_id = %id, "association written");
        Ok(HeroPowerWithEnds {
            hero_power: HeroPower {
                id,
                strength: new.strength,
                hero_id: new.hero_id,
                power_id: new.power_id,
            },
            hero,
            power,
        })
    }

    #[instrument(skip_all, err)]
    async fn seed(&self, data: &SeedData) -> Result<SeedReport, StoreError> {
        let mut tx = self.begin_write().await?;
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM heroes")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            info!(existing, "store already populated; skipping seed");
            return Ok(SeedReport::default());
        }

        let mut heroes = Vec::with_capacity(data.heroes.len());
        for seed in &data.heroes {
            heroes.push(insert_hero(&mut tx, seed.name, seed.super_name).await?.id);
        }
        let mut powers = Vec::with_capacity(data.powers.len());
        for seed in &data.powers {
            powers.push(insert_power(&mut tx, seed.name, seed.description).await?.id);
        }
        for seed in &data.hero_powers {
            let hero_id = *heroes.get(seed.hero).ok_or_else(|| StoreError::InvalidSeed {
                reason: format!("hero index {} out of range", seed.hero),
            })?;
            let power_id = *powers.get(seed.power).ok_or_else(|| StoreError::InvalidSeed {
                reason: format!("power index {} out of range", seed.power),
            })?;
            upsert_link(&mut tx, NewHeroPower { strength: seed.strength, hero_id, power_id })
                .await?;
        }
        tx.commit().await?;

        let report = SeedReport {
            heroes: heroes.len(),
            powers: powers.len(),
            hero_powers: data.hero_powers.len(),
        };
        info!(?report, "store seeded");
        Ok(report)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
