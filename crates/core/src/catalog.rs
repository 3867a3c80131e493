//! Static character catalog.
//!
//! Maps a character identifier to display metadata and the base prompt
//! fragment used when generating that character. Read-only; shared freely
//! across concurrent pack generations.

use serde::Serialize;

/// Catalog grouping shown in the character picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterCategory {
    Anime,
    Games,
    Movies,
}

impl CharacterCategory {
    /// Parse a category name as used in query strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "anime" => Some(Self::Anime),
            "games" => Some(Self::Games),
            "movies" => Some(Self::Movies),
            _ => None,
        }
    }
}

/// A selectable character.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    pub category: CharacterCategory,
    pub description: &'static str,
    pub image_url: &'static str,
    pub base_prompt: &'static str,
}

const THUMB_NINJA: &str = "https://images.unsplash.com/photo-1578662996442-48f60103fc96?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const THUMB_WARRIOR: &str = "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const THUMB_ADVENTURE: &str = "https://images.unsplash.com/photo-1551698618-1dfe5d97d256?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const THUMB_PORTRAIT: &str = "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const THUMB_GAMEPAD: &str = "https://images.unsplash.com/photo-1606144042614-b2417e99c4e3?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const THUMB_EXPLORER: &str = "https://images.unsplash.com/photo-1544005313-94ddf0286df2?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const THUMB_ARMOR: &str = "https://images.unsplash.com/photo-1635805737707-575885ab0820?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const THUMB_NIGHT: &str = "https://images.unsplash.com/photo-1581833971358-2c8b550f87b3?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";

/// Every character offered by the picker, grouped by category.
pub static CATALOG: &[Character] = &[
    // Anime
    Character {
        id: "naruto",
        name: "Naruto",
        category: CharacterCategory::Anime,
        description: "Ninja Hero with orange outfit",
        image_url: THUMB_NINJA,
        base_prompt: "orange ninja outfit, spiky blonde hair, determined expression, dynamic action pose",
    },
    Character {
        id: "goku",
        name: "Goku",
        category: CharacterCategory::Anime,
        description: "Saiyan Warrior with spiky hair",
        image_url: THUMB_WARRIOR,
        base_prompt: "spiky black hair, orange martial arts gi, muscular build, energy aura, fighting stance",
    },
    Character {
        id: "luffy",
        name: "Luffy",
        category: CharacterCategory::Anime,
        description: "Pirate Captain with straw hat",
        image_url: THUMB_ADVENTURE,
        base_prompt: "straw hat, red vest, cheerful smile, rubber powers, pirate captain pose",
    },
    Character {
        id: "sasuke",
        name: "Sasuke",
        category: CharacterCategory::Anime,
        description: "Rival Ninja with dark clothing",
        image_url: THUMB_NINJA,
        base_prompt: "dark ninja outfit, black hair, serious expression, lightning chakra effects",
    },
    Character {
        id: "todoroki",
        name: "Todoroki",
        category: CharacterCategory::Anime,
        description: "Ice Fire Hero with split hair",
        image_url: THUMB_WARRIOR,
        base_prompt: "split red and white hair, dual-colored eyes, ice and fire powers",
    },
    Character {
        id: "tanjiro",
        name: "Tanjiro",
        category: CharacterCategory::Anime,
        description: "Demon Slayer with checkered pattern",
        image_url: THUMB_PORTRAIT,
        base_prompt: "checkered haori, gentle expression, katana sword, demon slayer",
    },
    // Games
    Character {
        id: "mario",
        name: "Mario",
        category: CharacterCategory::Games,
        description: "Super Plumber with red cap",
        image_url: THUMB_GAMEPAD,
        base_prompt: "red cap with M logo, blue overalls, mustache, cheerful jumping pose",
    },
    Character {
        id: "link",
        name: "Link",
        category: CharacterCategory::Games,
        description: "Hyrule Hero in green tunic",
        image_url: THUMB_ADVENTURE,
        base_prompt: "green tunic, pointed ears, master sword, hylian shield, heroic stance",
    },
    Character {
        id: "masterchief",
        name: "Master Chief",
        category: CharacterCategory::Games,
        description: "Spartan Soldier in green armor",
        image_url: THUMB_NINJA,
        base_prompt: "green MJOLNIR armor, helmet visor, military stance, futuristic weapons",
    },
    Character {
        id: "lara",
        name: "Lara Croft",
        category: CharacterCategory::Games,
        description: "Tomb Raider with explorer outfit",
        image_url: THUMB_EXPLORER,
        base_prompt: "explorer outfit, brown hair, twin pistols, adventure archaeologist",
    },
    Character {
        id: "sonic",
        name: "Sonic",
        category: CharacterCategory::Games,
        description: "Blue Speedster with red shoes",
        image_url: THUMB_ADVENTURE,
        base_prompt: "blue hedgehog, spiky quills, red sneakers, speed effects, running pose",
    },
    Character {
        id: "kratos",
        name: "Kratos",
        category: CharacterCategory::Games,
        description: "God of War with dual axes",
        image_url: THUMB_WARRIOR,
        base_prompt: "bald head, red markings, muscular build, dual axes, warrior stance",
    },
    // Movies
    Character {
        id: "ironman",
        name: "Iron Man",
        category: CharacterCategory::Movies,
        description: "Armored Avenger with arc reactor",
        image_url: THUMB_ARMOR,
        base_prompt: "red and gold armor, arc reactor, repulsors, high-tech suit, flying pose",
    },
    Character {
        id: "batman",
        name: "Batman",
        category: CharacterCategory::Movies,
        description: "Dark Knight with cape and cowl",
        image_url: THUMB_NIGHT,
        base_prompt: "black cape, cowl mask, bat symbol, dark armor, brooding pose on rooftop",
    },
    Character {
        id: "wonderwoman",
        name: "Wonder Woman",
        category: CharacterCategory::Movies,
        description: "Amazon Warrior with golden tiara",
        image_url: THUMB_EXPLORER,
        base_prompt: "golden tiara, red and blue outfit, lasso of truth, warrior stance",
    },
    Character {
        id: "spiderman",
        name: "Spider-Man",
        category: CharacterCategory::Movies,
        description: "Wall Crawler with web pattern",
        image_url: THUMB_ARMOR,
        base_prompt: "red and blue suit, web pattern, web-slinging pose, dynamic movement",
    },
];

/// Look up a character by identifier.
pub fn find(id: &str) -> Option<&'static Character> {
    CATALOG.iter().find(|c| c.id == id)
}

/// All characters in a category, in catalog order.
pub fn by_category(category: CharacterCategory) -> Vec<&'static Character> {
    CATALOG.iter().filter(|c| c.category == category).collect()
}

/// Base prompt fragment for a character.
///
/// Unknown identifiers get the generic `"<id> character"` phrase.
pub fn base_prompt_for(id: &str) -> String {
    match find(id) {
        Some(character) => character.base_prompt.to_string(),
        None => format!("{id} character"),
    }
}
