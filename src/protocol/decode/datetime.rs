//! `VK_TIMESTAMP` / `VK_TIME` decoder.
//!
//! Wire layout: `u16` year LE, `u8` month, `u8` day, `u32` milliseconds-of-day
//! LE. Rendered as `DD.MM.YYYY` when the time-of-day is exactly midnight, or
//! `DD.MM.YYYY HH:MM:SS` otherwise.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tokio::io::AsyncRead;

use crate::error::{Error, Result};
use crate::protocol::buffer::ByteReader;

pub async fn decode_timestamp<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<String> {
    let year = reader.read_u16_le().await?;
    let month = reader.read_u8().await?;
    let day = reader.read_u8().await?;
    let millis_of_day = reader.read_u32_le().await?;

    let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .ok_or_else(|| Error::decode(format!("invalid date {year:04}-{month:02}-{day:02}")))?;

    if millis_of_day == 0 {
        return Ok(date.format("%d.%m.%Y").to_string());
    }

    let total_seconds = millis_of_day / 1000;
    let hour = total_seconds / 3600;
    let minute = (total_seconds % 3600) / 60;
    let second = total_seconds % 60;
    let time = NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| Error::decode(format!("invalid time-of-day {millis_of_day}ms")))?;

    Ok(NaiveDateTime::new(date, time)
        .format("%d.%m.%Y %H:%M:%S")
        .to_string())
}
