// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use crate::keyword::{
    KW_ALTREP, KW_BINARY, KW_BOOLEAN, KW_CAL_ADDRESS, KW_CN, KW_CUTYPE, KW_CUTYPE_GROUP,
    KW_CUTYPE_INDIVIDUAL, KW_CUTYPE_RESOURCE, KW_CUTYPE_ROOM, KW_CUTYPE_UNKNOWN, KW_DATE,
    KW_DATETIME, KW_DELEGATED_FROM, KW_DELEGATED_TO, KW_DIR, KW_DISPLAY, KW_DISPLAY_BADGE,
    KW_DISPLAY_FULLSIZE, KW_DISPLAY_GRAPHIC, KW_DISPLAY_THUMBNAIL, KW_DURATION, KW_EMAIL,
    KW_ENCODING, KW_ENCODING_8BIT, KW_ENCODING_BASE64, KW_FBTYPE, KW_FBTYPE_BUSY,
    KW_FBTYPE_BUSY_TENTATIVE, KW_FBTYPE_BUSY_UNAVAILABLE, KW_FBTYPE_FREE, KW_FEATURE,
    KW_FEATURE_AUDIO, KW_FEATURE_CHAT, KW_FEATURE_FEED, KW_FEATURE_MODERATOR, KW_FEATURE_PHONE,
    KW_FEATURE_SCREEN, KW_FEATURE_VIDEO, KW_FLOAT, KW_FMTTYPE, KW_INTEGER, KW_LABEL, KW_LANGUAGE,
    KW_MEMBER, KW_PARTSTAT, KW_PARTSTAT_ACCEPTED, KW_PARTSTAT_COMPLETED, KW_PARTSTAT_DECLINED,
    KW_PARTSTAT_DELEGATED, KW_PARTSTAT_IN_PROCESS, KW_PARTSTAT_NEEDS_ACTION,
    KW_PARTSTAT_TENTATIVE, KW_PERIOD, KW_RANGE, KW_RANGE_THISANDFUTURE, KW_RECUR, KW_RELATED,
    KW_RELATED_END, KW_RELATED_START, KW_RELTYPE, KW_RELTYPE_CHILD, KW_RELTYPE_PARENT,
    KW_RELTYPE_SIBLING, KW_ROLE, KW_ROLE_CHAIR, KW_ROLE_NON_PARTICIPANT, KW_ROLE_OPT_PARTICIPANT,
    KW_ROLE_REQ_PARTICIPANT, KW_RSVP, KW_RSVP_FALSE, KW_RSVP_TRUE, KW_SENT_BY, KW_TEXT, KW_TIME,
    KW_TZID, KW_URI, KW_UTC_OFFSET, KW_VALUE,
};
use crate::parameter::Parameter;

/// Macro to define enumerated parameter values.
///
/// Each enum gets its keyword via `name()`, a case-insensitive `FromStr`,
/// `Display`, and a conversion into a [`Parameter`] under the given key.
macro_rules! define_param_enum {
    (
        $(#[$meta:meta])*
        enum $Name:ident: $key:ident {
            $(
                $(#[$vmeta:meta])*
                $Variant:ident => $kw:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum $Name {
            $(
                $(#[$vmeta])*
                $Variant,
            )*
        }

        impl $Name {
            /// Returns the keyword for this value
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$Variant => $kw,
                    )*
                }
            }
        }

        impl FromStr for $Name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($kw) {
                        return Ok(Self::$Variant);
                    }
                )*
                Err(())
            }
        }

        impl fmt::Display for $Name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.name().fmt(f)
            }
        }

        impl From<$Name> for Parameter {
            fn from(value: $Name) -> Self {
                Parameter::single($key, value.name())
            }
        }
    };
}

define_param_enum! {
    /// Value data types (RFC 5545 Section 3.2.20)
    enum ValueType: KW_VALUE {
        Binary      => KW_BINARY,
        Boolean     => KW_BOOLEAN,
        CalAddress  => KW_CAL_ADDRESS,
        Date        => KW_DATE,
        DateTime    => KW_DATETIME,
        Duration    => KW_DURATION,
        Float       => KW_FLOAT,
        Integer     => KW_INTEGER,
        Period      => KW_PERIOD,
        Recur       => KW_RECUR,
        Text        => KW_TEXT,
        Time        => KW_TIME,
        Uri         => KW_URI,
        UtcOffset   => KW_UTC_OFFSET,
    }
}

define_param_enum! {
    /// Calendar user types (RFC 5545 Section 3.2.3)
    enum CalendarUserType: KW_CUTYPE {
        Individual  => KW_CUTYPE_INDIVIDUAL,
        Group       => KW_CUTYPE_GROUP,
        Resource    => KW_CUTYPE_RESOURCE,
        Room        => KW_CUTYPE_ROOM,
        Unknown     => KW_CUTYPE_UNKNOWN,
    }
}

define_param_enum! {
    /// Free/busy time types (RFC 5545 Section 3.2.9)
    enum FreeBusyType: KW_FBTYPE {
        Free            => KW_FBTYPE_FREE,
        Busy            => KW_FBTYPE_BUSY,
        BusyUnavailable => KW_FBTYPE_BUSY_UNAVAILABLE,
        BusyTentative   => KW_FBTYPE_BUSY_TENTATIVE,
    }
}

define_param_enum! {
    /// Participation status (RFC 5545 Section 3.2.12)
    enum ParticipationStatus: KW_PARTSTAT {
        NeedsAction => KW_PARTSTAT_NEEDS_ACTION,
        Accepted    => KW_PARTSTAT_ACCEPTED,
        Declined    => KW_PARTSTAT_DECLINED,
        Tentative   => KW_PARTSTAT_TENTATIVE,
        Delegated   => KW_PARTSTAT_DELEGATED,
        Completed   => KW_PARTSTAT_COMPLETED,
        InProcess   => KW_PARTSTAT_IN_PROCESS,
    }
}

define_param_enum! {
    /// Alarm trigger relationship (RFC 5545 Section 3.2.14)
    enum AlarmTriggerRelationship: KW_RELATED {
        Start   => KW_RELATED_START,
        End     => KW_RELATED_END,
    }
}

define_param_enum! {
    /// Hierarchical relationship types (RFC 5545 Section 3.2.15)
    enum RelationshipType: KW_RELTYPE {
        Parent  => KW_RELTYPE_PARENT,
        Child   => KW_RELTYPE_CHILD,
        Sibling => KW_RELTYPE_SIBLING,
    }
}

define_param_enum! {
    /// Participation roles (RFC 5545 Section 3.2.16)
    enum ParticipationRole: KW_ROLE {
        Chair           => KW_ROLE_CHAIR,
        ReqParticipant  => KW_ROLE_REQ_PARTICIPANT,
        OptParticipant  => KW_ROLE_OPT_PARTICIPANT,
        NonParticipant  => KW_ROLE_NON_PARTICIPANT,
    }
}

define_param_enum! {
    /// Image display modes (RFC 7986 Section 6.1)
    enum DisplayType: KW_DISPLAY {
        Badge       => KW_DISPLAY_BADGE,
        Graphic     => KW_DISPLAY_GRAPHIC,
        Fullsize    => KW_DISPLAY_FULLSIZE,
        Thumbnail   => KW_DISPLAY_THUMBNAIL,
    }
}

define_param_enum! {
    /// Conference features (RFC 7986 Section 6.3)
    enum FeatureType: KW_FEATURE {
        Audio       => KW_FEATURE_AUDIO,
        Chat        => KW_FEATURE_CHAT,
        Feed        => KW_FEATURE_FEED,
        Moderator   => KW_FEATURE_MODERATOR,
        Phone       => KW_FEATURE_PHONE,
        Screen      => KW_FEATURE_SCREEN,
        Video       => KW_FEATURE_VIDEO,
    }
}

/// `ALTREP`: alternate text representation URI.
pub fn alt_rep(uri: impl Into<String>) -> Parameter {
    Parameter::single(KW_ALTREP, uri)
}

/// `CN`: common name.
pub fn common_name(name: impl Into<String>) -> Parameter {
    Parameter::single(KW_CN, name)
}

/// `CUTYPE`: calendar user type.
#[must_use]
pub fn cu_type(kind: CalendarUserType) -> Parameter {
    kind.into()
}

/// `DELEGATED-FROM`: calendar users that delegated their participation.
pub fn delegator<I, S>(addresses: I) -> Parameter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Parameter::multiple(KW_DELEGATED_FROM, addresses)
}

/// `DELEGATED-TO`: calendar users participation was delegated to.
pub fn delegatee<I, S>(addresses: I) -> Parameter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Parameter::multiple(KW_DELEGATED_TO, addresses)
}

/// `DIR`: directory entry reference.
pub fn dir(uri: impl Into<String>) -> Parameter {
    Parameter::single(KW_DIR, uri)
}

/// `DISPLAY`: how an image is rendered.
#[must_use]
pub fn display(kind: DisplayType) -> Parameter {
    kind.into()
}

/// `EMAIL`: email address of an attendee or organizer.
pub fn email(address: impl Into<String>) -> Parameter {
    Parameter::single(KW_EMAIL, address)
}

/// `ENCODING`: `BASE64` when `base64` is true, `8BIT` otherwise.
#[must_use]
pub fn encoding(base64: bool) -> Parameter {
    let value = if base64 {
        KW_ENCODING_BASE64
    } else {
        KW_ENCODING_8BIT
    };
    Parameter::single(KW_ENCODING, value)
}

/// `FBTYPE`: free/busy time type.
#[must_use]
pub fn fb_type(kind: FreeBusyType) -> Parameter {
    kind.into()
}

/// `FEATURE`: one or more conference features.
pub fn feature(features: impl IntoIterator<Item = FeatureType>) -> Parameter {
    Parameter::multiple(KW_FEATURE, features.into_iter().map(FeatureType::name))
}

/// `FMTTYPE`: media type of the referenced object.
pub fn fmt_type(media_type: impl Into<String>) -> Parameter {
    Parameter::single(KW_FMTTYPE, media_type)
}

/// `FMTTYPE` built from a type and subtype, e.g. `image/png`.
#[must_use]
pub fn fmt_type_of(kind: &str, subtype: &str) -> Parameter {
    Parameter::single(KW_FMTTYPE, format!("{kind}/{subtype}"))
}

/// `LABEL`: human-readable label for a conference or location.
pub fn label(text: impl Into<String>) -> Parameter {
    Parameter::single(KW_LABEL, text)
}

/// `LANGUAGE`: language tag of the text value.
pub fn language(tag: impl Into<String>) -> Parameter {
    Parameter::single(KW_LANGUAGE, tag)
}

/// `MEMBER`: group or list membership.
pub fn member<I, S>(addresses: I) -> Parameter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Parameter::multiple(KW_MEMBER, addresses)
}

/// `PARTSTAT`: participation status.
#[must_use]
pub fn part_stat(status: ParticipationStatus) -> Parameter {
    status.into()
}

/// `RANGE=THISANDFUTURE`.
#[must_use]
pub fn range_this_and_future() -> Parameter {
    Parameter::single(KW_RANGE, KW_RANGE_THISANDFUTURE)
}

/// `RELATED`: whether a trigger is relative to start or end.
#[must_use]
pub fn related(relation: AlarmTriggerRelationship) -> Parameter {
    relation.into()
}

/// `RELTYPE`: relationship type.
#[must_use]
pub fn rel_type(kind: RelationshipType) -> Parameter {
    kind.into()
}

/// `ROLE`: participation role.
#[must_use]
pub fn role(role: ParticipationRole) -> Parameter {
    role.into()
}

/// `RSVP`: `TRUE` or `FALSE`.
#[must_use]
pub fn rsvp(expected: bool) -> Parameter {
    let value = if expected { KW_RSVP_TRUE } else { KW_RSVP_FALSE };
    Parameter::single(KW_RSVP, value)
}

/// `SENT-BY`: calendar user acting on behalf of another.
pub fn sent_by(address: impl Into<String>) -> Parameter {
    Parameter::single(KW_SENT_BY, address)
}

/// `TZID`: time zone identifier.
pub fn tz_id(tzid: impl Into<String>) -> Parameter {
    Parameter::single(KW_TZID, tzid)
}

/// `VALUE`: explicit value data type.
#[must_use]
pub fn value_type(kind: ValueType) -> Parameter {
    kind.into()
}
