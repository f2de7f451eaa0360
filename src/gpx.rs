//! GPX 1.1 track files, one per year.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io;

use crate::distance::round_km;
use crate::err::Error;
use crate::group::{DateGroup, YearGroup};
use crate::parser::Fix;

pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
pub const GPX_VERSION: &str = "1.1";

const INDENT: usize = 2;

/// Document level information. Everything that is not derived from the
/// fixes themselves, including the generation time, is passed in here.
#[derive(Debug, Clone)]
pub struct TrackMetadata<'a> {
    pub creator: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    /// The track is named `"{title_prefix} {year}"`.
    pub title_prefix: &'a str,
    pub generated_at: DateTime<Utc>,
}

/// File name of the track file of `year`: `{prefix}_{year}.gpx`.
pub fn track_file_name(prefix: &str, year: u16) -> String {
    format!("{}_{}.gpx", prefix, year)
}

/// Description of a segment, e.g. `23/03/2094 - 12.34 km`.
pub fn segment_label(group: &DateGroup) -> String {
    format!("{} - {:.2} km", group.date, round_km(group.distance_km))
}

/// Writes the track file of one year.
pub fn write_year<W: io::Write>(
    out: W,
    year: &YearGroup,
    meta: &TrackMetadata,
) -> Result<(), Error> {
    let mut w = Writer::new_with_indent(out, b' ', INDENT);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;

    let mut gpx = BytesStart::new("gpx");
    gpx.push_attribute(("version", GPX_VERSION));
    gpx.push_attribute(("creator", meta.creator));
    gpx.push_attribute(("xmlns", GPX_NAMESPACE));
    w.write_event(Event::Start(gpx.borrow()))?;

    w.write_event(Event::Start(BytesStart::new("metadata")))?;
    write_text(&mut w, "author", meta.author)?;
    write_text(&mut w, "desc", meta.description)?;
    write_text(
        &mut w,
        "time",
        &meta.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    )?;
    w.write_event(Event::End(BytesEnd::new("metadata")))?;

    w.write_event(Event::Start(BytesStart::new("trk")))?;
    write_text(
        &mut w,
        "name",
        &format!("{} {}", meta.title_prefix, year.year),
    )?;
    for group in year.dates.iter() {
        w.write_event(Event::Start(BytesStart::new("trkseg")))?;
        write_text(&mut w, "desc", &segment_label(group))?;
        for fix in group.fixes.iter() {
            write_point(&mut w, fix)?;
        }
        w.write_event(Event::End(BytesEnd::new("trkseg")))?;
    }
    w.write_event(Event::End(BytesEnd::new("trk")))?;

    w.write_event(Event::End(gpx.to_end()))?;
    Ok(())
}

fn write_point<W: io::Write>(w: &mut Writer<W>, fix: &Fix) -> Result<(), Error> {
    let mut trkpt = BytesStart::new("trkpt");
    trkpt.push_attribute(("lat", &*degrees_attr(fix.latitude_deg)));
    trkpt.push_attribute(("lon", &*degrees_attr(fix.longitude_deg)));

    if fix.altitude.is_none() && fix.timestamp.is_none() {
        w.write_event(Event::Empty(trkpt))?;
        return Ok(());
    }

    w.write_event(Event::Start(trkpt.borrow()))?;
    if let Some(ele) = fix.altitude {
        write_text(w, "ele", &format!("{}", ele))?;
    }
    if let Some(ts) = fix.timestamp {
        write_text(w, "time", &ts.format("%Y-%m-%dT%H:%M:%SZ").to_string())?;
    }
    w.write_event(Event::End(trkpt.to_end()))?;
    Ok(())
}

/// Decimal degrees as written into `lat`/`lon`: never in exponent notation,
/// always with a fractional part (`0.0`, `-0.0`, `11.5`).
fn degrees_attr(value: f64) -> String {
    let mut s = value.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

fn write_text<W: io::Write>(w: &mut Writer<W>, name: &str, text: &str) -> Result<(), Error> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_by_year;
    use crate::parser::{FixDate, FixTime};
    use chrono::{NaiveDate, TimeZone};

    fn fix(day: u8, second: u8, long: f64, with_time: bool) -> Fix {
        let date = FixDate {
            year: 2021,
            month: 7,
            day,
        };
        let time = FixTime {
            hour: 8,
            minute: 15,
            second,
        };
        Fix {
            date,
            time,
            latitude_deg: 0.0,
            longitude_deg: long,
            speed_kmh: None,
            course_deg: None,
            altitude: None,
            timestamp: if with_time {
                NaiveDate::from_ymd_opt(2021, 7, u32::from(day))
                    .and_then(|d| d.and_hms_opt(8, 15, u32::from(second)))
            } else {
                None
            },
        }
    }

    fn meta() -> TrackMetadata<'static> {
        TrackMetadata {
            creator: "rmc-track",
            author: "Jane & John",
            description: "Receiver <A>",
            title_prefix: "GPS track",
            generated_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    fn render(year: &YearGroup) -> String {
        let mut buf = Vec::new();
        write_year(&mut buf, year, &meta()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn file_name_contains_prefix_and_year() {
        assert_eq!(track_file_name("out/gps_output", 2021), "out/gps_output_2021.gpx");
    }

    #[test]
    fn writes_header_and_metadata() {
        let years = group_by_year(vec![fix(1, 0, 0.0, true)]);
        let doc = render(&years[0]);
        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>"));
        assert!(doc.contains(
            "<gpx version=\"1.1\" creator=\"rmc-track\" xmlns=\"http://www.topografix.com/GPX/1/1\">"
        ));
        assert!(doc.contains("<author>Jane &amp; John</author>"));
        assert!(doc.contains("<desc>Receiver &lt;A&gt;</desc>"));
        assert!(doc.contains("<time>2024-01-02T03:04:05Z</time>"));
        assert!(doc.contains("<name>GPS track 2021</name>"));
        assert!(doc.trim_end().ends_with("</gpx>"));
    }

    #[test]
    fn one_segment_per_day_in_ascending_order() {
        let years = group_by_year(vec![
            fix(12, 0, 2.0, true),
            fix(3, 0, 0.0, true),
            fix(12, 1, 4.0, true),
            fix(3, 1, 1.0, true),
        ]);
        let doc = render(&years[0]);
        assert_eq!(doc.matches("<trkseg>").count(), 2);
        let first = doc.find("<desc>03/07/2021 - 111.19 km</desc>").unwrap();
        let second = doc.find("<desc>12/07/2021 - 222.39 km</desc>").unwrap();
        assert!(first < second);

        // points keep arrival order inside a segment
        let a = doc.find("lon=\"2.0\"").unwrap();
        let b = doc.find("lon=\"4.0\"").unwrap();
        assert!(second < a && a < b);
        assert!(doc.contains("<time>2021-07-12T08:15:01Z</time>"));
    }

    #[test]
    fn optional_children_are_omitted() {
        let years = group_by_year(vec![fix(1, 0, 0.5, false)]);
        let doc = render(&years[0]);
        assert!(doc.contains("<trkpt lat=\"0.0\" lon=\"0.5\"/>"));
        assert!(!doc.contains("<ele>"));
        assert_eq!(doc.matches("<time>").count(), 1);
        assert!(doc.contains("<desc>01/07/2021 - 0.00 km</desc>"));
    }

    #[test]
    fn coordinates_keep_a_fractional_part() {
        assert_eq!(degrees_attr(0.0), "0.0");
        assert_eq!(degrees_attr(-0.0), "-0.0");
        assert_eq!(degrees_attr(-3.0), "-3.0");
        assert_eq!(degrees_attr(48.1173), "48.1173");
        assert_eq!(degrees_attr(0.000_001), "0.000001");
    }

    #[test]
    fn single_fix_day_is_labelled_zero() {
        let years = group_by_year(vec![fix(1, 0, 0.5, true)]);
        let day = &years[0].dates[0];
        assert!(day.distance_km.is_sign_positive());
        assert_eq!(segment_label(day), "01/07/2021 - 0.00 km");
    }

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_failures_are_io_errors() {
        let years = group_by_year(vec![fix(1, 0, 0.5, true)]);
        assert_matches!(
            write_year(BrokenPipe, &years[0], &meta()),
            Err(Error::Io(ref err)) if err.kind() == io::ErrorKind::BrokenPipe
        );
    }

    #[test]
    fn writes_elevation_when_present() {
        let mut with_ele = fix(1, 0, 0.5, true);
        with_ele.altitude = Some(545.4);
        let years = group_by_year(vec![with_ele]);
        let doc = render(&years[0]);
        assert!(doc.contains("<ele>545.4</ele>"));
    }
}
