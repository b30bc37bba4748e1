//! Record assembly.
//!
//! Section data is folded into a [`RecordBuilder`] in page order; the builder
//! owns the record until [`RecordBuilder::finish`] hands it out.

use tibiadex_shared::{
    Achievement, Badge, CharacterRecord, DeathEvent, OtherCharacterRef, Result, TibiaDexError,
};

use crate::fields::{Field, ProfileScope};

/// What one section contributed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SectionData {
    Profile(Vec<Field>),
    Badges(Vec<Badge>),
    Achievements(Vec<Achievement>),
    Deaths(Vec<DeathEvent>),
    Characters(Vec<OtherCharacterRef>),
}

#[derive(Debug, Default)]
pub(crate) struct RecordBuilder {
    record: CharacterRecord,
}

impl RecordBuilder {
    pub(crate) fn absorb(mut self, data: SectionData) -> Self {
        match data {
            SectionData::Profile(fields) => fields.into_iter().for_each(|f| self.apply(f)),
            SectionData::Badges(mut badges) => self.record.account_badges.append(&mut badges),
            SectionData::Achievements(mut list) => self.record.achievements.append(&mut list),
            SectionData::Deaths(mut deaths) => self.record.deaths.append(&mut deaths),
            SectionData::Characters(mut list) => self.record.other_characters.append(&mut list),
        }
        self
    }

    fn apply(&mut self, field: Field) {
        let identity = &mut self.record.character;
        match field {
            Field::Name {
                name,
                traded,
                deletion_date,
            } => {
                identity.name = name;
                identity.traded = traded;
                identity.deletion_date = deletion_date;
            }
            Field::FormerNames(names) => identity.former_names = names,
            Field::Sex(sex) => identity.sex = sex,
            Field::Title(title) => identity.title = Some(title),
            Field::Vocation(vocation) => identity.vocation = vocation,
            Field::Level(level) => identity.level = level,
            Field::AchievementPoints(points) => identity.achievement_points = points,
            Field::World(world) => identity.world = world,
            Field::FormerWorlds(worlds) => identity.former_worlds = worlds,
            Field::Residence(residence) => identity.residence = residence,
            Field::MarriedTo(spouse) => identity.married_to = Some(spouse),
            Field::LastLogin(at) => identity.last_login = Some(at),
            Field::AccountStatus(status) => identity.account_status = status,
            Field::Comment(comment) => identity.comment = Some(comment),
            Field::House(house) => self.record.houses.push(house),
            Field::Guild(guild) => self.record.guild = guild,
            Field::LoyaltyTitle(title) => {
                self.record.account_information.loyalty_title = Some(title);
            }
            Field::Created(at) => self.record.account_information.created = Some(at),
            Field::Position { scope, position } => match scope {
                ProfileScope::Character => identity.position = Some(position),
                ProfileScope::Account => {
                    self.record.account_information.position = Some(position);
                }
            },
        }
    }

    /// Hand out the record, or [`TibiaDexError::NotFound`] when nothing was
    /// ever filled.
    pub(crate) fn finish(self) -> Result<CharacterRecord> {
        if self.record == CharacterRecord::default() {
            return Err(TibiaDexError::NotFound);
        }
        Ok(self.record)
    }
}
