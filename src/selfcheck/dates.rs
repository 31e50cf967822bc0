use attest_core::DateValue;
use chrono::{Datelike, Utc};

use crate::assertion::Assert;
use crate::test::Test;

pub(super) fn tests() -> Vec<Test> {
    vec![
        Test::new("Comparing Dates", |e| {
            let date = DateValue::from_ymd(2024, 5, 26);
            e.expect(date)
                .auto_named()
                .date()?
                .to_be_after(DateValue::from_ymd_hms_milli(2024, 5, 25, 12, 35, 1, 50))?;
            e.expect(date)
                .auto_named()
                .date()?
                .to_be_before(DateValue::from_ymd_hms_milli(2024, 5, 27, 15, 15, 15, 15))?;
            Ok(())
        }),
        Test::new("Validity test", |e| {
            e.expect(DateValue::now()).auto_named().date()?.to_be_valid();
            e.expect(DateValue::parse("qwerty")).auto_named().date()?.to_be_invalid();
            Ok(())
        }),
        Test::new("Date test", |e| {
            let year = Utc::now().year();
            let valentines = DateValue::from_ymd(year, 2, 14);
            let pi_day = DateValue::from_ymd(year, 3, 14);
            let christmas = DateValue::from_ymd(year, 12, 25);

            e.expect(valentines).auto_named().date()?.to_be_on(None, Some(2), Some(14))?;
            e.expect(vec![valentines, pi_day])
                .auto_named()
                .sequence()?
                .for_all_elements(|d, _| d.auto_named().date()?.to_be_on(None, None, Some(14)))?;
            e.expect(christmas).auto_named().date()?.to_be_on(Some(year), Some(12), Some(25))?;
            Ok(())
        }),
        Test::new("Time test", |e| {
            let noon = DateValue::from_ymd_hms_milli(1970, 1, 1, 12, 0, 0, 0);
            let half_past_three = DateValue::from_ymd_hms_milli(1970, 1, 1, 15, 30, 0, 0);
            let quarter_to_four = DateValue::from_ymd_hms_milli(1970, 1, 1, 15, 45, 0, 0);

            e.expect(noon).auto_named().date()?.to_be_at(Some(12), Some(0), Some(0), Some(0))?;
            e.expect(half_past_three).auto_named().date()?.to_be_at(Some(15), Some(30), None, None)?;
            e.expect(vec![half_past_three, quarter_to_four])
                .auto_named()
                .sequence()?
                .for_all_elements(|d, _| d.auto_named().date()?.to_be_at(Some(15), None, None, None))?;
            Ok(())
        }),
    ]
}
