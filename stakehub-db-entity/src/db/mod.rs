pub mod deposit;
pub mod product;
pub mod referral_code;
pub mod stake;
pub mod stake_return;
pub mod user_account;
pub mod withdrawal;
