use async_trait::async_trait;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::debug;

use kabinet_core::models::ScheduleRule;
use kabinet_core::store::RuleStore;

use crate::models::DbScheduleRule;

/// Postgres-backed schedule-rule store.
#[derive(Clone)]
pub struct PgRuleStore {
    pool: Pool<Postgres>,
}

impl PgRuleStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgRuleStore { pool }
    }
}

#[async_trait]
impl RuleStore for PgRuleStore {
    async fn get_all(&self) -> Result<Vec<ScheduleRule>> {
        let rows = sqlx::query_as::<_, DbScheduleRule>(
            r#"
            SELECT id, rule_date, start_time, end_time, duration, slot_interval,
                   location, session_type, created_at
            FROM schedule_rules
            ORDER BY rule_date ASC, start_time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbScheduleRule::into_rule).collect())
    }

    /// Selective save: rules flagged `deleted` are removed, everything else
    /// is upserted under its storage id. Rules absent from the payload are
    /// never touched, so a partial submission cannot wipe the schedule.
    async fn save(&self, rules: Vec<ScheduleRule>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for rule in rules {
            let storage_id = rule.storage_id();
            if rule.deleted {
                debug!(rule_id = %storage_id, "removing tombstoned schedule rule");
                sqlx::query(
                    r#"
                    DELETE FROM schedule_rules
                    WHERE id = $1
                    "#,
                )
                .bind(&storage_id)
                .execute(&mut *tx)
                .await?;
                continue;
            }

            sqlx::query(
                r#"
                INSERT INTO schedule_rules
                    (id, rule_date, start_time, end_time, duration, slot_interval,
                     location, session_type)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO UPDATE SET
                    rule_date = EXCLUDED.rule_date,
                    start_time = EXCLUDED.start_time,
                    end_time = EXCLUDED.end_time,
                    duration = EXCLUDED.duration,
                    slot_interval = EXCLUDED.slot_interval,
                    location = EXCLUDED.location,
                    session_type = EXCLUDED.session_type
                "#,
            )
            .bind(&storage_id)
            .bind(&rule.date)
            .bind(&rule.start)
            .bind(&rule.end)
            .bind(rule.duration.map(|d| d as i32))
            .bind(rule.interval.map(|i| i as i32))
            .bind(&rule.location)
            .bind(&rule.session_type)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
