//! Route text form: `Origin,Line,[Junction],Line,Destination`.
//!
//! Parsing also accepts junctions without brackets, so
//! `Tokyo,Tokaido,Shinagawa,Yamanote,Shibuya` and the rendered
//! `Tokyo,Tokaido,[Shinagawa],Yamanote,Shibuya` name the same route.

use std::fmt;

use crate::domain::RouteError;
use crate::reference::ReferenceData;

use super::Route;

/// Renders a route with station and line names.
pub struct RouteDisplay<'a, R: ReferenceData + ?Sized> {
    route: &'a Route,
    reference: &'a R,
}

impl<R: ReferenceData + ?Sized> fmt::Display for RouteDisplay<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let station = |id| self.reference.station_name(id).unwrap_or("?");
        let Some(origin) = self.route.origin() else {
            return Ok(());
        };

        write!(f, "{}", station(origin))?;
        for (i, segment) in self.route.segments().iter().enumerate() {
            if i > 0 {
                write!(f, "[{}]", station(segment.begin))?;
            }
            let line = self.reference.line_name(segment.line).unwrap_or("?");
            write!(f, ",{line},")?;
        }
        if let Some(last) = self.route.segments().last() {
            write!(f, "{}", station(last.end))?;
        }
        Ok(())
    }
}

impl Route {
    pub fn display<'a, R: ReferenceData + ?Sized>(&'a self, reference: &'a R) -> RouteDisplay<'a, R> {
        RouteDisplay {
            route: self,
            reference,
        }
    }

    /// Parses `Origin,Line,Station[,Line,Station...]`.
    pub fn parse<R: ReferenceData + ?Sized>(text: &str, reference: &R) -> Result<Route, RouteError> {
        let tokens: Vec<&str> = text
            .split(',')
            .map(|t| t.trim())
            .map(|t| t.strip_prefix('[').and_then(|t| t.strip_suffix(']')).unwrap_or(t).trim())
            .collect();

        if tokens.iter().any(|t| t.is_empty()) {
            return Err(RouteError::Malformed("empty name"));
        }
        if tokens.len() % 2 == 0 {
            return Err(RouteError::Malformed("line without a following station"));
        }

        let station = |name: &str| {
            reference
                .station_id(name)
                .ok_or_else(|| RouteError::UnknownStation(name.to_string()))
        };

        let mut route = Route::starting_at(station(tokens[0])?);
        for pair in tokens[1..].chunks(2) {
            let line = reference
                .line_id(pair[0])
                .ok_or_else(|| RouteError::UnknownLine(pair[0].to_string()))?;
            route.append(line, station(pair[1])?)?;
        }
        Ok(route)
    }
}
