//! Shared constructors for the crate's unit tests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use citylens_types::{AaParams, City, House, HouseNum, Plot, PlotNum, PlotStatus};

/// A fixed reference instant used as "city start" across tests.
pub(crate) fn start_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

pub(crate) fn make_city(total_land: Decimal, total_rented: Decimal) -> City {
    City {
        name: "testville".to_owned(),
        total_land,
        total_rented,
        total_bought: Decimal::ZERO,
        count_plots: 0,
        count_houses: 0,
        mayor: None,
        started_at: start_time(),
        matching_probability: None,
        plot_price: None,
        referral_boost: None,
    }
}

pub(crate) fn make_plot(num: u64, amount: Decimal) -> Plot {
    Plot {
        plot_num: PlotNum::new(num),
        status: PlotStatus::Land,
        x: 100,
        y: 200,
        amount,
        owner: Some("OWNER".to_owned()),
        info: None,
        created_at: start_time(),
        rented_amount: None,
        rental_expiry: None,
        sale_price: None,
        ref_plot_num: None,
        referrer: None,
    }
}

pub(crate) fn make_house(num: u64, plot: u64, amount: Decimal) -> House {
    House {
        house_num: HouseNum::new(num),
        plot_num: PlotNum::new(plot),
        x: 100,
        y: 200,
        amount,
        owner: Some("OWNER".to_owned()),
        info: None,
        created_at: start_time(),
        shortcode: None,
        shortcode_price: None,
    }
}

pub(crate) fn make_params() -> AaParams {
    AaParams {
        matching_probability: Decimal::new(5, 2),
        plot_price: Decimal::from(1000),
        referral_boost: Decimal::new(1, 1),
        rental_surcharge_factor: Decimal::new(15, 1),
        p2p_sale_fee: Decimal::new(1, 2),
        shortcode_sale_fee: Decimal::new(2, 2),
        followup_reward_share: Decimal::new(5, 1),
        randomness_aa: None,
        attestors: Vec::new(),
        mayor: None,
    }
}
