use super::{escape, optional, page};
use crate::core::shipping::{flight_progress, segment_is_active, ship_status};
use crate::domain::model::{Fleet, Flight, FlightLine, Ship};
use crate::utils::time::{format_display, format_epoch_ms, from_epoch_ms, parse_timestamp, relative_to};
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub const TITLE: &str = "Flight Data";

pub fn render(username: Option<&str>, fleet: Option<&Fleet>, now: DateTime<Utc>) -> String {
    let mut body = String::new();
    body.push_str(&render_form(username));
    body.push_str(
        "<div><p>Public data by default, create a user and save your API key to fetch data available to you.</p>\
         <p>Data may be stale from FIO.</p></div><hr>",
    );

    body.push_str("<h2>Active Flights</h2><div class=\"cards\">");
    match fleet.map(|f| f.flights.as_slice()) {
        Some(flights) if !flights.is_empty() => {
            for flight in flights {
                body.push_str(&render_flight(flight, now));
            }
        }
        _ => body.push_str("<p>No flight data.</p>"),
    }
    body.push_str("</div>");

    body.push_str("<h2>Available Ships</h2><div class=\"cards\">");
    match fleet.map(|f| f.ships.as_slice()) {
        Some(ships) if !ships.is_empty() => {
            for ship in ships {
                body.push_str(&render_ship(ship, now));
            }
        }
        _ => body.push_str("<p>No ship data.</p>"),
    }
    body.push_str("</div>");

    page(TITLE, &body)
}

/// Shown when FIO answers 401 for the requested user.
pub fn render_access_denied(username: &str) -> String {
    let body = format!(
        "<div class=\"denied\"><p>You don't have access to view this users shipping data.</p>\
         <p>Contact {} to provide you access to their FIO flight data.</p>\
         <a class=\"button\" href=\"/shipping\">Go Back</a></div>",
        escape(username)
    );
    page(TITLE, &body)
}

fn render_form(username: Option<&str>) -> String {
    format!(
        r#"<form method="get" action="/shipping">
<label for="username">Username</label>
<input id="username" type="text" name="username" value="{}" style="text-transform: lowercase" required>
<button type="submit">Submit</button>
</form>"#,
        escape(username.unwrap_or_default())
    )
}

fn collected_on(timestamp: &str, now: DateTime<Utc>) -> String {
    let when = match parse_timestamp(timestamp) {
        Some(dt) => format!("{}, {}", format_display(&dt), relative_to(&dt, &now)),
        None => escape(timestamp),
    };
    format!("<div><p>Game information collected on</p><p>{}</p></div>", when)
}

fn epoch_with_relative(epoch_ms: i64, now: DateTime<Utc>) -> String {
    match from_epoch_ms(epoch_ms) {
        Some(dt) => format!("{}, {}", format_display(&dt), relative_to(&dt, &now)),
        None => epoch_ms.to_string(),
    }
}

fn render_ship(ship: &Ship, now: DateTime<Utc>) -> String {
    let mut html = String::from(r#"<div class="card ship">"#);
    let _ = write!(html, "<h3>{}</h3>", escape(&ship.registration));
    let _ = write!(
        html,
        "<div><p>Status: {}</p><p>Location: {}</p></div>",
        ship_status(ship),
        escape(&ship.location)
    );

    html.push_str("<details><summary>View raw data.</summary>");
    html.push_str("<p><b>Identification</b></p>");
    let _ = write!(html, "<p>ShipId: {}</p>", escape(&ship.ship_id));
    let _ = write!(html, "<p>Registration: {}</p>", escape(&ship.registration));
    let _ = write!(html, "<p>Name: {}</p>", escape(ship.name.as_deref().unwrap_or_default()));
    let _ = write!(html, "<br><p>Location: {}</p>", escape(&ship.location));
    for line in &ship.address_lines {
        let _ = write!(
            html,
            "<p>{}: {} {}</p>",
            escape(&line.line_type),
            escape(line.natural_id.as_deref().unwrap_or_default()),
            escape(line.line_name.as_deref().unwrap_or_default())
        );
    }
    let _ = write!(
        html,
        "<p>Flight ID: {}</p>",
        escape(ship.flight_id.as_deref().unwrap_or_default())
    );
    html.push_str("<br><p><b>Storage</b></p>");
    let _ = write!(html, "<p>StoreId: {}</p>", escape(&ship.store_id));
    let _ = write!(html, "<p>StlFuelStoreId: {}</p>", escape(&ship.stl_fuel_store_id));
    let _ = write!(html, "<p>FtlFuelStoreId: {}</p>", escape(&ship.ftl_fuel_store_id));
    html.push_str("<br><p><b>Stats</b></p>");
    let _ = write!(
        html,
        "<p>Commissioning Time: {}</p>",
        format_epoch_ms(ship.commissioning_time_epoch_ms)
    );
    let _ = write!(html, "<p>Blueprint Natural ID: {}</p>", escape(&ship.blueprint_natural_id));
    let _ = write!(html, "<p>Acceleration: {}</p>", ship.acceleration);
    let _ = write!(html, "<p>Thrust: {}</p>", ship.thrust);
    let _ = write!(html, "<p>Mass: {}</p>", ship.mass);
    let _ = write!(html, "<p>Operating Empty Mass: {}</p>", ship.operating_empty_mass);
    let _ = write!(html, "<p>Reactor Power: {}</p>", ship.reactor_power);
    let _ = write!(html, "<p>Emitter Power: {}</p>", ship.emitter_power);
    let _ = write!(html, "<p>Volume: {}</p>", ship.volume);
    let _ = write!(html, "<p>Condition: {}</p>", ship.condition);
    let _ = write!(html, "<p>Last Repair: {}</p>", optional(ship.last_repair_epoch_ms));
    let _ = write!(html, "<p>Stl Fuel Flow Rate: {}</p>", ship.stl_fuel_flow_rate);
    if !ship.repair_materials.is_empty() {
        html.push_str("<br><p><b>Repair Materials</b></p>");
        for material in &ship.repair_materials {
            let _ = write!(
                html,
                "<p>{} × {}</p>",
                material.amount,
                escape(&material.material_ticker)
            );
        }
    }
    let _ = write!(
        html,
        "<br><p>User Name Submitted: {}</p><p>Timestamp: {}</p>",
        escape(&ship.user_name_submitted),
        escape(&ship.timestamp)
    );
    html.push_str("</details>");

    html.push_str(&collected_on(&ship.timestamp, now));
    html.push_str("</div>");
    html
}

fn render_flight(flight: &Flight, now: DateTime<Utc>) -> String {
    let now_ms = now.timestamp_millis();
    let progress = flight_progress(
        flight.departure_time_epoch_ms,
        flight.arrival_time_epoch_ms,
        now_ms,
    );

    let mut html = String::from(r#"<div class="card flight">"#);
    let _ = write!(html, "<h3>{}</h3>", escape(&flight.ship_id));
    let _ = write!(
        html,
        r#"<div><p><b>Progress:</b></p><progress max="100" value="{:.1}">{:.0}%</progress></div><hr>"#,
        progress, progress
    );
    let _ = write!(
        html,
        "<div><p><b>Departure:</b></p><p>{}</p><p>from <b>{}</b></p></div>",
        epoch_with_relative(flight.departure_time_epoch_ms, now),
        escape(&flight.origin)
    );
    let _ = write!(
        html,
        "<div><p><b>Arrival:</b></p><p>{}</p><p>to <b>{}</b></p></div>",
        epoch_with_relative(flight.arrival_time_epoch_ms, now),
        escape(&flight.destination)
    );

    html.push_str(&render_flight_raw(flight, now_ms));
    html.push_str(&collected_on(&flight.timestamp, now));
    html.push_str("</div>");
    html
}

fn render_flight_raw(flight: &Flight, now_ms: i64) -> String {
    let mut html = String::from("<details><summary>View raw data.</summary>");
    let _ = write!(html, "<p>Flight ID: {}</p>", escape(&flight.flight_id));
    let _ = write!(html, "<p>Ship ID: {}</p>", escape(&flight.ship_id));
    let _ = write!(html, "<p>Origin: {}</p>", escape(&flight.origin));
    let _ = write!(html, "<p>Destination: {}</p>", escape(&flight.destination));
    let _ = write!(
        html,
        "<p>Departure Time: {}</p>",
        format_epoch_ms(flight.departure_time_epoch_ms)
    );
    let _ = write!(
        html,
        "<p>Arrival Time: {}</p>",
        format_epoch_ms(flight.arrival_time_epoch_ms)
    );
    let _ = write!(html, "<p>STL Distance: {}</p>", flight.stl_distance);
    let _ = write!(html, "<p>FTL Distance: {}</p>", flight.ftl_distance);
    let _ = write!(
        html,
        "<p>Is Aborted: {}</p>",
        if flight.is_aborted { "Yes" } else { "No" }
    );
    let _ = write!(html, "<p>Current Segment: {}</p>", flight.current_segment_index);

    html.push_str(
        "<table><thead><tr><th>Segment</th><th>Type</th><th>Origin</th><th>Destination</th>\
         <th>Departure Time</th><th>Arrival Time</th><th>STL Distance</th>\
         <th>STL Fuel Consumption</th><th>FTL Distance</th><th>FTL Fuel Consumption</th></tr></thead><tbody>",
    );
    for (index, segment) in flight.segments.iter().enumerate() {
        let class = if segment_is_active(segment, now_ms) {
            r#" class="active""#
        } else {
            ""
        };
        let _ = write!(
            html,
            "<tr><td{}>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            class,
            index + 1,
            escape(&segment.segment_type),
            escape(&segment.origin),
            escape(&segment.destination),
            format_epoch_ms(segment.departure_time_epoch_ms),
            format_epoch_ms(segment.arrival_time_epoch_ms),
            optional(segment.stl_distance),
            optional(segment.stl_fuel_consumption),
            optional(segment.ftl_distance),
            optional(segment.ftl_fuel_consumption),
        );
    }
    html.push_str("</tbody></table>");

    html.push_str("<details><summary>View OriginLines/DestinationLines</summary>");
    for (index, segment) in flight.segments.iter().enumerate() {
        let _ = write!(html, "<div><p>Segment {} Sub-Lines</p>", index + 1);
        html.push_str(
            "<table><thead><tr><th>Type</th><th>Line ID</th><th>Direction</th>\
             <th>Line Natural ID</th><th>Line Name</th></tr></thead><tbody>",
        );
        for line in &segment.origin_lines {
            html.push_str(&render_line(line, "Origin"));
        }
        for line in &segment.destination_lines {
            html.push_str(&render_line(line, "Destination"));
        }
        html.push_str("</tbody></table></div>");
    }
    html.push_str("</details></details>");
    html
}

fn render_line(line: &FlightLine, direction: &str) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&line.line_type),
        escape(&line.line_id),
        direction,
        escape(line.line_natural_id.as_deref().unwrap_or_default()),
        escape(line.line_name.as_deref().unwrap_or_default()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FlightSegment;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap()
    }

    fn flight() -> Flight {
        let now_ms = now().timestamp_millis();
        Flight {
            segments: vec![
                FlightSegment {
                    origin_lines: vec![FlightLine {
                        line_type: "PLANET".to_string(),
                        line_id: "p1".to_string(),
                        line_natural_id: Some("UV-351a".to_string()),
                        line_name: Some("Promitor".to_string()),
                    }],
                    destination_lines: Vec::new(),
                    segment_type: "TAKE_OFF".to_string(),
                    departure_time_epoch_ms: now_ms - 7_200_000,
                    arrival_time_epoch_ms: now_ms - 3_600_000,
                    stl_distance: None,
                    stl_fuel_consumption: None,
                    ftl_distance: None,
                    ftl_fuel_consumption: None,
                    origin: "Promitor".to_string(),
                    destination: "Promitor Orbit".to_string(),
                },
                FlightSegment {
                    origin_lines: Vec::new(),
                    destination_lines: Vec::new(),
                    segment_type: "TRANSIT".to_string(),
                    departure_time_epoch_ms: now_ms - 3_600_000,
                    arrival_time_epoch_ms: now_ms + 7_200_000,
                    stl_distance: Some(12.5),
                    stl_fuel_consumption: Some(3.0),
                    ftl_distance: None,
                    ftl_fuel_consumption: None,
                    origin: "Promitor Orbit".to_string(),
                    destination: "Montem Orbit".to_string(),
                },
            ],
            flight_id: "f1".to_string(),
            ship_id: "AVI-05E81".to_string(),
            origin: "Promitor".to_string(),
            destination: "Montem".to_string(),
            departure_time_epoch_ms: now_ms - 7_200_000,
            arrival_time_epoch_ms: now_ms + 7_200_000,
            current_segment_index: 1,
            stl_distance: 12.5,
            ftl_distance: 0.0,
            is_aborted: false,
            username_submitted: "alice".to_string(),
            timestamp: "2024-03-30T09:00:00".to_string(),
        }
    }

    #[test]
    fn test_empty_page_shows_placeholders() {
        let html = render(None, None, now());
        assert!(html.contains("No flight data."));
        assert!(html.contains("No ship data."));
        assert!(html.contains("<title>Flight Data</title>"));
    }

    #[test]
    fn test_flight_card_progress_and_active_segment() {
        let fleet = Fleet {
            ships: Vec::new(),
            flights: vec![flight()],
        };
        let html = render(Some("alice"), Some(&fleet), now());

        assert!(html.contains(r#"value="50.0""#));
        assert!(html.contains("<td>1</td><td>TAKE_OFF</td>"));
        assert!(html.contains(r#"<td class="active">2</td><td>TRANSIT</td>"#));
        assert!(html.contains("Mar 30 2024 10:00:00 AM, 2 hours ago"));
        assert!(html.contains("<td>UV-351a</td>"));
        assert!(html.contains("Mar 30 2024 9:00:00 AM, 3 hours ago"));
        assert!(html.contains("No ship data."));
    }

    #[test]
    fn test_access_denied_names_user() {
        let html = render_access_denied("<bob>");
        assert!(html.contains("Contact &lt;bob&gt; to provide you access"));
        assert!(html.contains(r#"href="/shipping""#));
    }
}
