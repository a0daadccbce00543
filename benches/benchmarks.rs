// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gh_activity::{format_utc_timestamp, normalize_calendar, normalize_events};
use serde_json::{Value, json};

fn calendar_document(weeks: usize,) -> Value
{
    let weeks: Vec<Value,> = (0..weeks)
        .map(|week| {
            let days: Vec<Value,> = (0..7)
                .map(|day| {
                    json!({
                        "date": format!("2025-W{week:02}-{day}"),
                        "contributionCount": (week * 7 + day) % 5,
                        "contributionLevel": "FIRST_QUARTILE",
                    })
                },)
                .collect();
            json!({"contributionDays": days})
        },)
        .collect();

    json!({
        "data": {"user": {"contributionsCollection": {"contributionCalendar": {
            "totalContributions": 700,
            "weeks": weeks,
        }}}}
    })
}

fn benchmark_calendar_year(c: &mut Criterion,)
{
    let document = calendar_document(53,);

    c.bench_function("normalize_calendar_year", |b| {
        b.iter(|| normalize_calendar(black_box(&document,),).expect("normalize failed",),)
    },);
}

fn benchmark_idle_calendar(c: &mut Criterion,)
{
    let mut document = calendar_document(53,);
    for week in document["data"]["user"]["contributionsCollection"]["contributionCalendar"]["weeks"]
        .as_array_mut()
        .expect("weeks array",)
    {
        for day in week["contributionDays"].as_array_mut().expect("days array",) {
            day["contributionCount"] = json!(0);
        }
    }

    c.bench_function("normalize_idle_calendar", |b| {
        b.iter(|| normalize_calendar(black_box(&document,),).expect("normalize failed",),)
    },);
}

fn benchmark_event_page(c: &mut Criterion,)
{
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0,).single().expect("valid timestamp",);
    let events: Vec<Value,> = (0..100)
        .map(|index| {
            json!({
                "type": "PushEvent",
                "created_at": format_utc_timestamp(now - Duration::hours(index * 3)),
            })
        },)
        .collect();

    c.bench_function("normalize_event_page", |b| {
        b.iter(|| normalize_events(black_box(&events,), now,),)
    },);
}

criterion_group!(benches, benchmark_calendar_year, benchmark_idle_calendar, benchmark_event_page);
criterion_main!(benches);
