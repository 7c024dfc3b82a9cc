use crate::domain::{
    AdvancedStats, MetricDirection, OnOffStats, Player, Season, StatPercentiles, TraditionalStats,
    ADVANCED_METRICS,
};
use crate::error::Result;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow, Postgres};
use sqlx::{QueryBuilder, Row};
use tracing::{info, instrument};

/// PostgreSQL storage adapter
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

const PLAYER_COLUMNS: &str = "player_id, nba_player_id, full_name, first_name, last_name, \
     team, team_abbreviation, position, birthdate, height_in, weight_lbs, country, \
     draft_year, draft_round, draft_number, from_year, to_year, is_active";

fn player_from_row(row: &PgRow) -> Player {
    Player {
        player_id: Some(row.get("player_id")),
        nba_player_id: row.get("nba_player_id"),
        full_name: row.get("full_name"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        team: row.get("team"),
        team_abbreviation: row.get("team_abbreviation"),
        position: row.get("position"),
        birthdate: row.get("birthdate"),
        height_in: row.get("height_in"),
        weight_lbs: row.get("weight_lbs"),
        country: row.get("country"),
        draft_year: row.get("draft_year"),
        draft_round: row.get("draft_round"),
        draft_number: row.get("draft_number"),
        from_year: row.get("from_year"),
        to_year: row.get("to_year"),
        is_active: row.get("is_active"),
    }
}

impl PostgresStore {
    /// Create a new PostgreSQL store
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Create a PostgreSQL store from an existing connection pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ==================== Players ====================

    /// Insert or update a player, keyed on the external identifier.
    #[instrument(skip(self, player), fields(nba_player_id = player.nba_player_id))]
    pub async fn upsert_player(&self, player: &Player) -> Result<i32> {
        let row = sqlx::query(
            r#"
            INSERT INTO players (
                nba_player_id, full_name, first_name, last_name, team, team_abbreviation,
                position, birthdate, height_in, weight_lbs, country, draft_year,
                draft_round, draft_number, from_year, to_year, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (nba_player_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                team = EXCLUDED.team,
                team_abbreviation = EXCLUDED.team_abbreviation,
                position = EXCLUDED.position,
                birthdate = EXCLUDED.birthdate,
                height_in = EXCLUDED.height_in,
                weight_lbs = EXCLUDED.weight_lbs,
                country = EXCLUDED.country,
                draft_year = EXCLUDED.draft_year,
                draft_round = EXCLUDED.draft_round,
                draft_number = EXCLUDED.draft_number,
                from_year = EXCLUDED.from_year,
                to_year = EXCLUDED.to_year,
                is_active = EXCLUDED.is_active
            RETURNING player_id
            "#,
        )
        .bind(player.nba_player_id)
        .bind(&player.full_name)
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(&player.team)
        .bind(&player.team_abbreviation)
        .bind(&player.position)
        .bind(player.birthdate)
        .bind(player.height_in)
        .bind(player.weight_lbs)
        .bind(&player.country)
        .bind(&player.draft_year)
        .bind(&player.draft_round)
        .bind(&player.draft_number)
        .bind(player.from_year)
        .bind(player.to_year)
        .bind(player.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("player_id"))
    }

    /// List all players
    pub async fn list_players(&self) -> Result<Vec<Player>> {
        let rows = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players ORDER BY full_name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    /// Get a player by internal id
    pub async fn get_player(&self, player_id: i32) -> Result<Option<Player>> {
        let row = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = $1"
        ))
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(player_from_row))
    }

    /// Get a player by external id
    pub async fn get_player_by_external_id(&self, nba_player_id: i64) -> Result<Option<Player>> {
        let row = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE nba_player_id = $1"
        ))
        .bind(nba_player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(player_from_row))
    }

    /// Find a player by a case-insensitive, diacritic-insensitive substring
    /// match on the full name. First match wins; ambiguous partial matches
    /// are not disambiguated further. The ORDER BY makes "first" stable:
    /// exact matches, then prefix matches, then anything.
    pub async fn find_player_by_name(&self, name: &str) -> Result<Option<Player>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {PLAYER_COLUMNS} FROM players
            WHERE unaccent(full_name) ILIKE unaccent($1)
            ORDER BY
                (lower(unaccent(full_name)) = lower(unaccent($2))) DESC,
                (unaccent(full_name) ILIKE unaccent($3)) DESC,
                player_id
            LIMIT 1
            "#
        ))
        .bind(format!("%{name}%"))
        .bind(name)
        .bind(format!("{name}%"))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(player_from_row))
    }

    /// Autocomplete search: ranked name matches, bounded.
    pub async fn search_players(&self, query: &str, limit: i64) -> Result<Vec<Player>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PLAYER_COLUMNS} FROM players
            WHERE unaccent(full_name) ILIKE unaccent($1)
            ORDER BY
                (lower(unaccent(full_name)) = lower(unaccent($2))) DESC,
                (unaccent(full_name) ILIKE unaccent($3)) DESC,
                full_name
            LIMIT $4
            "#
        ))
        .bind(format!("%{query}%"))
        .bind(query)
        .bind(format!("{query}%"))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    /// Resolve an internal player id from an external id and/or a name.
    /// The external-id lookup is authoritative; the name lookup is the
    /// fuzzy fallback.
    pub async fn resolve_player_id(
        &self,
        external_id: Option<i64>,
        name: Option<&str>,
    ) -> Result<Option<i32>> {
        if let Some(external_id) = external_id {
            let id: Option<i32> =
                sqlx::query_scalar("SELECT player_id FROM players WHERE nba_player_id = $1")
                    .bind(external_id)
                    .fetch_optional(&self.pool)
                    .await?;
            if id.is_some() {
                return Ok(id);
            }
        }

        if let Some(name) = name {
            let player = self.find_player_by_name(name).await?;
            return Ok(player.and_then(|p| p.player_id));
        }

        Ok(None)
    }

    // ==================== Stat upserts ====================

    /// Bulk upsert advanced stats. One multi-row INSERT inside one
    /// transaction: either the whole batch commits or the error propagates
    /// and the dropped transaction rolls everything back.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn upsert_advanced_stats(&self, rows: &[AdvancedStats]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO advanced_stats \
             (player_id, season, off_rating, def_rating, ts_pct, usg_pct, efg_pct, pie, pts, reb, ast) ",
        );
        qb.push_values(rows, |mut b, r| {
            b.push_bind(r.player_id)
                .push_bind(&r.season)
                .push_bind(r.off_rating)
                .push_bind(r.def_rating)
                .push_bind(r.ts_pct)
                .push_bind(r.usg_pct)
                .push_bind(r.efg_pct)
                .push_bind(r.pie)
                .push_bind(r.pts)
                .push_bind(r.reb)
                .push_bind(r.ast);
        });
        qb.push(
            " ON CONFLICT (player_id, season) DO UPDATE SET \
              off_rating = EXCLUDED.off_rating, \
              def_rating = EXCLUDED.def_rating, \
              ts_pct = EXCLUDED.ts_pct, \
              usg_pct = EXCLUDED.usg_pct, \
              efg_pct = EXCLUDED.efg_pct, \
              pie = EXCLUDED.pie, \
              pts = EXCLUDED.pts, \
              reb = EXCLUDED.reb, \
              ast = EXCLUDED.ast",
        );

        let result = qb.build().execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    /// Bulk upsert traditional per-game stats, same batch semantics as
    /// [`upsert_advanced_stats`].
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn upsert_traditional_stats(&self, rows: &[TraditionalStats]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO traditional_stats \
             (player_id, season, pts_per_game, ast_per_game, reb_per_game, stl_per_game, \
              blk_per_game, fg_pct, fg3_pct, ft_pct) ",
        );
        qb.push_values(rows, |mut b, r| {
            b.push_bind(r.player_id)
                .push_bind(&r.season)
                .push_bind(r.ppg)
                .push_bind(r.apg)
                .push_bind(r.rpg)
                .push_bind(r.spg)
                .push_bind(r.bpg)
                .push_bind(r.fg_pct)
                .push_bind(r.fg3_pct)
                .push_bind(r.ft_pct);
        });
        qb.push(
            " ON CONFLICT (player_id, season) DO UPDATE SET \
              pts_per_game = EXCLUDED.pts_per_game, \
              ast_per_game = EXCLUDED.ast_per_game, \
              reb_per_game = EXCLUDED.reb_per_game, \
              stl_per_game = EXCLUDED.stl_per_game, \
              blk_per_game = EXCLUDED.blk_per_game, \
              fg_pct = EXCLUDED.fg_pct, \
              fg3_pct = EXCLUDED.fg3_pct, \
              ft_pct = EXCLUDED.ft_pct",
        );

        let result = qb.build().execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    /// Bulk upsert on/off-court rating splits.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn upsert_on_off_stats(&self, rows: &[OnOffStats]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO on_off_stats \
             (player_id, season, off_rating_on, off_rating_off, def_rating_on, def_rating_off, \
              net_rating_on, net_rating_off) ",
        );
        qb.push_values(rows, |mut b, r| {
            b.push_bind(r.player_id)
                .push_bind(&r.season)
                .push_bind(r.off_rating_on)
                .push_bind(r.off_rating_off)
                .push_bind(r.def_rating_on)
                .push_bind(r.def_rating_off)
                .push_bind(r.net_rating_on)
                .push_bind(r.net_rating_off);
        });
        qb.push(
            " ON CONFLICT (player_id, season) DO UPDATE SET \
              off_rating_on = EXCLUDED.off_rating_on, \
              off_rating_off = EXCLUDED.off_rating_off, \
              def_rating_on = EXCLUDED.def_rating_on, \
              def_rating_off = EXCLUDED.def_rating_off, \
              net_rating_on = EXCLUDED.net_rating_on, \
              net_rating_off = EXCLUDED.net_rating_off",
        );

        let result = qb.build().execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    // ==================== Stat reads ====================

    /// Get advanced stats for one (player, season)
    pub async fn get_advanced_stats(
        &self,
        player_id: i32,
        season: &Season,
    ) -> Result<Option<AdvancedStats>> {
        let row = sqlx::query(
            r#"
            SELECT stat_id, player_id, season, off_rating, def_rating, ts_pct,
                   usg_pct, efg_pct, pie, pts, reb, ast
            FROM advanced_stats
            WHERE player_id = $1 AND season = $2
            "#,
        )
        .bind(player_id)
        .bind(season.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| AdvancedStats {
            stat_id: Some(r.get("stat_id")),
            player_id: r.get("player_id"),
            season: r.get("season"),
            off_rating: r.get("off_rating"),
            def_rating: r.get("def_rating"),
            ts_pct: r.get("ts_pct"),
            usg_pct: r.get("usg_pct"),
            efg_pct: r.get("efg_pct"),
            pie: r.get("pie"),
            pts: r.get("pts"),
            reb: r.get("reb"),
            ast: r.get("ast"),
        }))
    }

    /// Get traditional per-game stats for one (player, season), with the
    /// column aliases the API exposes (ppg/apg/rpg/spg/bpg).
    pub async fn get_traditional_stats(
        &self,
        player_id: i32,
        season: &Season,
    ) -> Result<Option<TraditionalStats>> {
        let row = sqlx::query(
            r#"
            SELECT
                stat_id,
                player_id,
                season,
                pts_per_game AS ppg,
                ast_per_game AS apg,
                reb_per_game AS rpg,
                stl_per_game AS spg,
                blk_per_game AS bpg,
                fg_pct,
                fg3_pct,
                ft_pct
            FROM traditional_stats
            WHERE player_id = $1 AND season = $2
            "#,
        )
        .bind(player_id)
        .bind(season.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| TraditionalStats {
            stat_id: Some(r.get("stat_id")),
            player_id: r.get("player_id"),
            season: r.get("season"),
            ppg: r.get("ppg"),
            apg: r.get("apg"),
            rpg: r.get("rpg"),
            spg: r.get("spg"),
            bpg: r.get("bpg"),
            fg_pct: r.get("fg_pct"),
            fg3_pct: r.get("fg3_pct"),
            ft_pct: r.get("ft_pct"),
        }))
    }

    // ==================== Percentiles ====================

    /// Percentile ranks for one player against the full season population.
    /// Computed in SQL with window functions; the CTE ranks everyone for
    /// the season, the outer query picks one player out.
    pub async fn get_percentiles(
        &self,
        player_id: i32,
        season: &Season,
    ) -> Result<Option<StatPercentiles>> {
        let sql = format!(
            r#"
            WITH ranked AS (
                SELECT
                    player_id,
                    {}
                FROM advanced_stats
                WHERE season = $1
            )
            SELECT * FROM ranked
            WHERE player_id = $2
            "#,
            percentile_select_list()
        );

        let row = sqlx::query(&sql)
            .bind(season.as_str())
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| StatPercentiles {
            player_id: r.get("player_id"),
            off_rating_pct: r.get("off_rating_pct"),
            def_rating_pct: r.get("def_rating_pct"),
            ts_pct_pct: r.get("ts_pct_pct"),
            usg_pct_pct: r.get("usg_pct_pct"),
            efg_pct_pct: r.get("efg_pct_pct"),
            pie_pct: r.get("pie_pct"),
            pts_pct: r.get("pts_pct"),
            reb_pct: r.get("reb_pct"),
            ast_pct: r.get("ast_pct"),
        }))
    }
}

/// Build the window-function select list from the metric direction table.
/// Higher-is-better metrics rank descending so the best value gets
/// PERCENT_RANK 0, inverted to percentile 100; lower-is-better metrics
/// (defensive rating) rank ascending. Nulls sort last in the window, so
/// null-valued players land at the bottom of every ranking.
fn percentile_select_list() -> String {
    ADVANCED_METRICS
        .iter()
        .map(|(metric, direction)| {
            let order = match direction {
                MetricDirection::HigherIsBetter => "DESC",
                MetricDirection::LowerIsBetter => "ASC",
            };
            format!(
                "(1 - PERCENT_RANK() OVER (ORDER BY {metric} {order} NULLS LAST)) * 100 AS {metric}_pct"
            )
        })
        .collect::<Vec<_>>()
        .join(",\n                    ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_select_list_orders_def_rating_ascending() {
        let sql = percentile_select_list();
        assert!(sql.contains("ORDER BY def_rating ASC NULLS LAST"));
        assert!(sql.contains("ORDER BY off_rating DESC NULLS LAST"));
        assert!(sql.contains("AS def_rating_pct"));
    }

    #[test]
    fn test_percentile_select_list_covers_every_metric() {
        let sql = percentile_select_list();
        for (metric, _) in ADVANCED_METRICS {
            assert!(sql.contains(&format!("AS {metric}_pct")), "missing {metric}");
        }
    }

    #[test]
    fn test_percentile_select_list_inverts_percent_rank() {
        // (1 - PERCENT_RANK()) * 100 puts the best performer at 100
        let sql = percentile_select_list();
        assert!(sql.contains("(1 - PERCENT_RANK() OVER"));
        assert!(sql.contains(") * 100 AS"));
    }
}
