use lazy_static::lazy_static;
use prometheus::{
    opts, register_counter_vec, register_gauge_vec, CounterVec, GaugeVec,
};

macro_rules! PREFIX {
    () => {
        "pledge_site_"
    };
}

lazy_static! {
    pub static ref PLEDGES_ACCEPTED: CounterVec = {
        register_counter_vec!(
            opts!(
                concat!(PREFIX!(), "pledges_accepted"),
                "Number of pledges saved."
            ),
            &["artwork_id"]
        )
        .unwrap()
    };
    pub static ref PLEDGES_REFUSED: CounterVec = {
        register_counter_vec!(
            opts!(
                concat!(PREFIX!(), "pledges_refused"),
                "Number of pledges refused or that failed to be saved."
            ),
            &["artwork_id", "reason"]
        )
        .unwrap()
    };
    pub static ref HIGHEST_PLEDGE: GaugeVec = {
        register_gauge_vec!(
            opts!(
                concat!(PREFIX!(), "highest_pledge"),
                "Highest pledge known after the last accepted one."
            ),
            &["artwork_id"]
        )
        .unwrap()
    };
}
