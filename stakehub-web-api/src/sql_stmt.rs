use sea_orm::DbBackend;

pub const DB_BACKEND: DbBackend = DbBackend::Postgres;

pub const ALL_STAKES: &str = r#"SELECT stake.id,
    stake.user_id,
    user_account.name AS user_name,
    user_account.email AS user_email,
    stake.product_id,
    stake.product_title,
    stake.stake_amount,
    stake.income_percentage,
    stake.profit_amount,
    stake.handling_fee,
    stake.duration_days,
    stake.maturity_date,
    stake.status,
    stake.created_at,
    stake.completed_at
    FROM stake
    JOIN user_account ON user_account.id = stake.user_id
    ORDER BY stake.created_at DESC"#;

pub const ALL_STAKES_BY_STATUS: &str = r#"SELECT stake.id,
    stake.user_id,
    user_account.name AS user_name,
    user_account.email AS user_email,
    stake.product_id,
    stake.product_title,
    stake.stake_amount,
    stake.income_percentage,
    stake.profit_amount,
    stake.handling_fee,
    stake.duration_days,
    stake.maturity_date,
    stake.status,
    stake.created_at,
    stake.completed_at
    FROM stake
    JOIN user_account ON user_account.id = stake.user_id
    WHERE stake.status = $1
    ORDER BY stake.created_at DESC"#;
