//! # 时间字符串工具
//!
//! 两种格式的解析器共享的时间换算函数。内部统一先换算为整数毫秒，
//! 再转为秒，以保证 `21.66` 这类值能得到与字面量完全相同的浮点数。

use crate::{ConvertError, TtmlTimeMode};

/// 毫秒转为秒。
#[must_use]
pub fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// 将 1 到 3 位的小数部分（`.1`、`.12`、`.123`）换算为毫秒。
#[must_use]
pub fn fraction_to_ms(fraction: &str) -> Option<u64> {
    if fraction.is_empty() || fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let value: u64 = fraction.parse().ok()?;
    Some(value * 10u64.pow(3 - fraction.len() as u32))
}

fn overflow_error(time_str: &str) -> ConvertError {
    ConvertError::InvalidTime(format!("时间戳 '{time_str}' 超出可表示范围"))
}

/// 把各部分合计为毫秒，溢出时返回 `None`。
fn checked_total_ms(hours: u64, minutes: u64, seconds: u64, milliseconds: u64) -> Option<u64> {
    hours
        .checked_mul(3_600_000)?
        .checked_add(minutes.checked_mul(60_000)?)?
        .checked_add(seconds.checked_mul(1000)?)?
        .checked_add(milliseconds)
}

/// 解析 "SS" 或 "SS.fff"，返回 (秒, 毫秒)。
fn parse_seconds_part(part: &str, original: &str) -> Result<(u64, u64), ConvertError> {
    let (seconds_str, fraction) = match part.split_once('.') {
        Some((seconds_str, fraction)) => (seconds_str, Some(fraction)),
        None => (part, None),
    };

    if seconds_str.is_empty() {
        return Err(ConvertError::InvalidTime(format!(
            "时间戳 '{original}' 的秒部分为空"
        )));
    }

    let seconds = seconds_str.parse::<u64>().map_err(|e| {
        ConvertError::InvalidTime(format!(
            "在时间戳 '{original}' 中解析秒 '{seconds_str}' 失败: {e}"
        ))
    })?;

    let milliseconds = match fraction {
        Some(fraction) => fraction_to_ms(fraction).ok_or_else(|| {
            ConvertError::InvalidTime(format!(
                "时间戳 '{original}' 的小数部分 '{fraction}' 无效 (只支持 1 到 3 位数字)"
            ))
        })?,
        None => 0,
    };

    Ok((seconds, milliseconds))
}

/// 解析时钟格式的时间字符串到毫秒。
///
/// 支持 `HH:MM:SS.fff`、`MM:SS.fff`、`SS.fff` 以及带 `s` 后缀的 `SS.fffs`。
/// 各部分从右往左对齐，小数部分按十进制小数处理。
pub fn parse_clock_time_ms(time_str: &str) -> Result<u64, ConvertError> {
    let time_str = time_str.trim();
    if time_str.starts_with('-') {
        return Err(ConvertError::InvalidTime(format!(
            "时间戳不能为负: '{time_str}'"
        )));
    }

    if let Some(stripped) = time_str.strip_suffix('s') {
        let (seconds, milliseconds) = parse_seconds_part(stripped, time_str)?;
        return checked_total_ms(0, 0, seconds, milliseconds)
            .ok_or_else(|| overflow_error(time_str));
    }

    let mut parts = time_str.rsplit(':');
    let last_part = parts.next().unwrap_or_default();
    let (seconds, milliseconds) = parse_seconds_part(last_part, time_str)?;

    let minutes = parts
        .next()
        .map(|minutes_str| {
            minutes_str.parse::<u64>().map_err(|e| {
                ConvertError::InvalidTime(format!(
                    "在 '{time_str}' 中解析分钟 '{minutes_str}' 失败: {e}"
                ))
            })
        })
        .transpose()?;

    let hours = parts
        .next()
        .map(|hours_str| {
            hours_str.parse::<u64>().map_err(|e| {
                ConvertError::InvalidTime(format!(
                    "在 '{time_str}' 中解析小时 '{hours_str}' 失败: {e}"
                ))
            })
        })
        .transpose()?;

    if parts.next().is_some() {
        return Err(ConvertError::InvalidTime(format!(
            "时间格式 '{time_str}' 包含过多部分"
        )));
    }

    if minutes.is_some() && seconds >= 60 {
        return Err(ConvertError::InvalidTime(format!(
            "秒值 '{seconds}' (应 < 60) 在时间戳 '{time_str}' 中无效"
        )));
    }
    if let (Some(_), Some(minutes)) = (hours, minutes)
        && minutes >= 60
    {
        return Err(ConvertError::InvalidTime(format!(
            "分钟值 '{minutes}' (应 < 60) 在时间戳 '{time_str}' 中无效"
        )));
    }

    checked_total_ms(
        hours.unwrap_or(0),
        minutes.unwrap_or(0),
        seconds,
        milliseconds,
    )
    .ok_or_else(|| overflow_error(time_str))
}

/// 模仿 `parseInt` 的行为：跳过前导空白，读取可选的符号和尽可能多的数字。
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// 按旧版规则逐字面解析时间字符串，结果为秒。
///
/// 规则：按 `:` 分割，两段及以上时第一段是小时、第二段是分钟，
/// 只有一段时它就是分钟；另按 `.` 分割，点之前的部分给出秒，
/// 点之后的部分作为整数毫秒除以 1000，不按位数归一化。
/// 每个部分都只读取前导整数，因此 `"00:21.66"` 会得到 `1260.066`。
pub fn parse_legacy_time(time_str: &str) -> Result<f64, ConvertError> {
    let invalid = || ConvertError::InvalidTime(format!("无法按旧版规则解析时间戳 '{time_str}'"));

    let colon_parts: Vec<&str> = time_str.split(':').collect();
    let dot_parts: Vec<&str> = time_str.split('.').collect();

    let (hours, minutes) = if colon_parts.len() > 1 {
        (
            leading_integer(colon_parts[0]).ok_or_else(invalid)?,
            leading_integer(colon_parts[1]).ok_or_else(invalid)?,
        )
    } else {
        (0, leading_integer(colon_parts[0]).ok_or_else(invalid)?)
    };

    let (seconds, milliseconds) = if dot_parts.len() > 1 {
        (
            leading_integer(dot_parts[0]).ok_or_else(invalid)?,
            leading_integer(dot_parts[1]).ok_or_else(invalid)?,
        )
    } else {
        (0, 0)
    };

    let total_seconds = hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(|| overflow_error(time_str))?;

    Ok(total_seconds as f64 + milliseconds as f64 / 1000.0)
}

/// 按指定模式解析时间字符串，结果为秒。
pub fn parse_time_seconds(time_str: &str, mode: TtmlTimeMode) -> Result<f64, ConvertError> {
    match mode {
        TtmlTimeMode::Clock => parse_clock_time_ms(time_str).map(ms_to_seconds),
        TtmlTimeMode::Legacy => parse_legacy_time(time_str),
    }
}
