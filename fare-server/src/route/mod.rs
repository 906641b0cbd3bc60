//! Journey routes.
//!
//! A [`Route`] is an origin station followed by directed segments, each
//! travelling one line. Routes are built by appending, checked with
//! [`Route::is_valid`], and canonicalized before pricing so that contiguous
//! travel along one line is a single segment.

mod text;

use tracing::{debug, error, trace};

use crate::domain::{CompanyTariff, LineId, RouteError, Segment, StationId};
use crate::fare::{FareAccumulator, FareError, SegmentCharge};
use crate::reference::ReferenceData;

pub use text::RouteDisplay;

/// An ordered sequence of segments starting at an origin.
///
/// Right after [`Route::begin`] the route is open: it has an origin and no
/// segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    origin: Option<StationId>,
    segments: Vec<Segment>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an open route at `station`.
    pub fn starting_at(station: StationId) -> Self {
        Self {
            origin: Some(station),
            segments: Vec::new(),
        }
    }

    /// Empties the route and opens it at `station`.
    pub fn begin(&mut self, station: StationId) {
        self.segments.clear();
        self.origin = Some(station);
    }

    pub fn reset(&mut self) {
        self.segments.clear();
        self.origin = None;
    }

    pub fn origin(&self) -> Option<StationId> {
        self.origin
    }

    /// The last station reached, or the origin of an open route.
    pub fn destination(&self) -> Option<StationId> {
        self.segments.last().map(|s| s.end).or(self.origin)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the route has no origin.
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
    }

    /// Travels `line` from the current end of the route to `next`.
    pub fn append(&mut self, line: LineId, next: StationId) -> Result<(), RouteError> {
        let from = self.destination().ok_or(RouteError::EmptyRoute)?;
        self.segments.push(Segment::new(from, line, next));
        Ok(())
    }

    /// Appends an explicit segment.
    ///
    /// Fails on an open route, where the segment would compete with the
    /// origin as the start of travel. Connectivity is not checked here.
    pub fn append_segment(
        &mut self,
        line: LineId,
        begin: StationId,
        end: StationId,
    ) -> Result<(), RouteError> {
        match self.origin {
            Some(_) if self.segments.is_empty() => return Err(RouteError::AppendConflict),
            Some(_) => {}
            None => self.origin = Some(begin),
        }
        self.segments.push(Segment::new(begin, line, end));
        Ok(())
    }

    /// Returns true if the route passes `station`.
    pub fn contains<R: ReferenceData + ?Sized>(&self, station: StationId, reference: &R) -> bool {
        if self.segments.is_empty() {
            return self.origin == Some(station);
        }
        self.segments
            .iter()
            .any(|segment| reference.contains(segment, station))
    }

    /// Checks that the route is connected and never revisits a station.
    ///
    /// The last station of each segment is not counted, so a route may end
    /// at a station it passed earlier or back at its origin. An empty route
    /// is not valid.
    pub fn is_valid<R: ReferenceData + ?Sized>(&self, reference: &R) -> bool {
        match self.check(reference) {
            Ok(()) => true,
            Err(reason) => {
                debug!(reason, "Route rejected");
                false
            }
        }
    }

    fn check<R: ReferenceData + ?Sized>(&self, reference: &R) -> Result<(), &'static str> {
        let origin = self.origin.ok_or("no origin")?;
        let Some(first) = self.segments.first() else {
            return Ok(());
        };
        if first.begin != origin {
            return Err("first segment does not start at origin");
        }
        if self.segments.windows(2).any(|w| !w[0].connects_to(&w[1])) {
            return Err("segments are not connected");
        }
        if self.segments.iter().any(Segment::is_degenerate) {
            return Err("zero-length segment");
        }

        let mut visited = Vec::new();
        for segment in &self.segments {
            let mut stations = reference
                .stations_on(segment)
                .ok_or("segment end is not on its line")?;
            stations.pop();
            visited.extend(stations);
        }

        for (i, a) in self.segments.iter().enumerate() {
            for b in self.segments[i + 1..].iter().filter(|b| b.line == a.line) {
                if let (Some(x), Some(y)) = (reference.travel_range(a), reference.travel_range(b)) {
                    if x.overlaps(&y) {
                        return Err("line travelled twice over the same section");
                    }
                }
            }
        }

        visited.sort_unstable();
        if visited.windows(2).any(|w| w[0] == w[1]) {
            return Err("station visited twice");
        }
        Ok(())
    }

    /// Returns the route with adjacent same-line, same-direction segments
    /// merged.
    ///
    /// Segments whose direction the reference data cannot report are left
    /// alone.
    pub fn canonicalized<R: ReferenceData + ?Sized>(&self, reference: &R) -> Route {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            if let Some(last) = merged.last_mut() {
                if same_run(last, segment, reference) {
                    trace!(line = %segment.line, "Merging segments");
                    last.end = segment.end;
                    continue;
                }
            }
            merged.push(*segment);
        }
        Route {
            origin: self.origin,
            segments: merged,
        }
    }

    pub fn canonicalize<R: ReferenceData + ?Sized>(&mut self, reference: &R) {
        *self = self.canonicalized(reference);
    }

    /// Resolves every segment to a charge and folds them into a
    /// [`FareAccumulator`].
    ///
    /// A segment with a special fare contributes that fare; any other
    /// segment contributes its mileage. Mileage that reference data cannot
    /// attribute to a company of the primary group is an integrity fault.
    pub fn accumulate_fare<R: ReferenceData + ?Sized>(
        &self,
        reference: &R,
    ) -> Result<FareAccumulator, FareError> {
        let charges = self
            .segments
            .iter()
            .map(|segment| segment_charge(segment, reference))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FareAccumulator::fold(charges))
    }
}

fn same_run<R: ReferenceData + ?Sized>(a: &Segment, b: &Segment, reference: &R) -> bool {
    if a.line != b.line || !a.connects_to(b) {
        return false;
    }
    match (reference.travel_range(a), reference.travel_range(b)) {
        (Some(first), Some(second)) => first.direction() == second.direction(),
        _ => false,
    }
}

fn segment_charge<R: ReferenceData + ?Sized>(
    segment: &Segment,
    reference: &R,
) -> Result<SegmentCharge, FareError> {
    if let Some(special) = reference.special_fare(segment) {
        return Ok(SegmentCharge::Special(special));
    }

    let Some(parts) = reference.decompose(segment) else {
        error!(?segment, "Segment cannot be decomposed");
        return Err(FareError::integrity(format!(
            "no mileage for segment {} {}-{}",
            segment.line, segment.begin, segment.end
        )));
    };

    for share in &parts.shares {
        let in_group = reference
            .company_tariff(share.company)
            .is_some_and(CompanyTariff::is_group);
        if !in_group {
            error!(?segment, company = %share.company, "Mileage outside the primary group");
            return Err(FareError::integrity(format!(
                "segment on {} has mileage for {} outside the primary group",
                segment.line, share.company
            )));
        }
    }
    Ok(SegmentCharge::Mileage(parts))
}
