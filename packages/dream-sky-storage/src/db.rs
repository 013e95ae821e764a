use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{BoxFuture, DreamStore, Result, models::DreamRow, schema};
use dream_sky_domain::Dream;

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &dream_sky_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let lock_id: i64 = 4_417_309;
		// Advisory locks are held per connection. Use a single transaction so the lock is scoped to
		// one connection and automatically released when the transaction ends.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;

		for statement in schema::statements() {
			sqlx::query(statement).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}

	async fn insert_dream(&self, dream: &Dream) -> Result<()> {
		let row = DreamRow::from(dream);

		sqlx::query(
			"\
INSERT INTO dreams (
	dream_id,
	description,
	image_reference,
	mood,
	mood_score,
	pos_x,
	pos_y,
	pos_z,
	created_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)",
		)
		.bind(row.dream_id)
		.bind(row.description)
		.bind(row.image_reference)
		.bind(row.mood)
		.bind(row.mood_score)
		.bind(row.pos_x)
		.bind(row.pos_y)
		.bind(row.pos_z)
		.bind(row.created_at)
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	async fn select_dreams(&self) -> Result<Vec<Dream>> {
		let rows: Vec<DreamRow> = sqlx::query_as(
			"\
SELECT dream_id, description, image_reference, mood, mood_score, pos_x, pos_y, pos_z, created_at
FROM dreams",
		)
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(Dream::try_from).collect()
	}

	async fn count_dreams(&self) -> Result<u64> {
		let count: i64 = sqlx::query_scalar("SELECT count(*) FROM dreams").fetch_one(&self.pool).await?;

		Ok(count.max(0) as u64)
	}
}

impl DreamStore for Db {
	fn append<'a>(&'a self, dream: &'a Dream) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.insert_dream(dream))
	}

	fn list_all(&self) -> BoxFuture<'_, Result<Vec<Dream>>> {
		Box::pin(self.select_dreams())
	}

	fn count(&self) -> BoxFuture<'_, Result<u64>> {
		Box::pin(self.count_dreams())
	}
}
