use rocket::fairing::AdHoc;

pub mod deposit;
pub mod stake;
pub mod sweep;
pub mod withdrawal;

pub fn mount() -> AdHoc {
    AdHoc::on_ignite("Attaching Routes", |rocket| async {
        rocket.mount(
            "/",
            routes![
                deposit::create,
                deposit::approve,
                deposit::reject,
                stake::create,
                stake::user_stakes,
                stake::all_stakes,
                sweep::process_matured_stakes,
                sweep::process_daily_income,
                withdrawal::create,
                withdrawal::approve,
                withdrawal::reject
            ],
        )
    })
}
