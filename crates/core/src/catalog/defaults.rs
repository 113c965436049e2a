//! The built-in catalog used to seed an empty store and to backfill
//! narrative fields during reconciliation.

use crate::types::{Availability, Price, Product, ProductId};

struct Seed {
    id: u32,
    name: &'static str,
    price: u64,
    image: &'static str,
    description: &'static str,
    full_description: &'static str,
    importance: &'static str,
    category: &'static str,
    tags: [&'static str; 3],
}

const SEEDS: [Seed; 6] = [
    Seed {
        id: 1,
        name: "OBD II(16PIN)",
        price: 2700,
        image: "images/products/IMG-20251230-WA0027.jpg",
        description: "Universal 16-pin OBD II diagnostic cable compatible with all modern vehicles. \
            Read and clear engine codes, monitor real-time data, and perform comprehensive vehicle diagnostics.",
        full_description: "Universal 16-pin OBD II diagnostic cable for vehicles built after 1996. \
            Read and clear engine codes, watch live sensor data and track fuel economy without a trip to the garage.\n\n\
            **Perfect For:** DIY mechanics and anyone who wants to catch problems before they become expensive repairs.",
        importance: "Essential diagnostic tool that saves money on mechanic fees and helps maintain vehicle health.",
        category: "Diagnostic Tools",
        tags: ["OBD", "diagnostic", "cable"],
    },
    Seed {
        id: 2,
        name: "AUTEL OBDII CABLE",
        price: 4500,
        image: "images/products/IMG-20251230-WA0028.jpg",
        description: "Premium AUTEL OBDII diagnostic cable with advanced features. \
            Compatible with AUTEL diagnostic scanners for professional-grade vehicle analysis.",
        full_description: "Premium AUTEL OBDII cable engineered for AUTEL scanners. \
            Gives access to ABS, SRS and transmission modules as well as ECU programming functions.\n\n\
            **Perfect For:** Professional mechanics and ECU tuners who need reliable deep-system access.",
        importance: "Professional-grade cable essential for advanced diagnostics and ECU programming.",
        category: "Diagnostic Tools",
        tags: ["AUTEL", "OBD", "cable"],
    },
    Seed {
        id: 3,
        name: "LAUNCH(16 PIN)CABLE",
        price: 3500,
        image: "images/products/IMG-20251230-WA0029.jpg",
        description: "Professional LAUNCH 16-pin diagnostic cable for comprehensive vehicle scanning. \
            Compatible with LAUNCH diagnostic tools for ECU programming and key programming.",
        full_description: "Professional LAUNCH 16-pin cable for complete system scans, key programming and ECU work. \
            Premium connectors keep the link stable through long sessions.\n\n\
            **Perfect For:** Key programming specialists and technicians servicing every vehicle module.",
        importance: "Critical tool for key programming and comprehensive vehicle diagnostics.",
        category: "Diagnostic Tools",
        tags: ["LAUNCH", "cable", "diagnostic"],
    },
    Seed {
        id: 4,
        name: "CAR IMAGE SYSTEM",
        price: 4500,
        image: "images/products/IMG-20251230-WA0030.jpg",
        description: "Advanced car imaging and backup camera system. \
            Enhance your vehicle safety with high-quality rearview cameras and parking sensors.",
        full_description: "Rearview cameras, parking sensors and optional front and side cameras for full visibility, \
            day or night. Plug-and-play installation.\n\n\
            **Perfect For:** Drivers of larger vehicles and families who want to park without guesswork.",
        importance: "Prevents accidents and expensive repairs while providing peace of mind.",
        category: "Safety & Security",
        tags: ["camera", "safety", "parking"],
    },
    Seed {
        id: 5,
        name: "CATALYTIC CONVERTER",
        price: 6500,
        image: "images/products/IMG-20251230-WA0031.jpg",
        description: "High-performance catalytic converter replacement. \
            Restore your vehicle's exhaust efficiency and reduce harmful emissions.",
        full_description: "High-performance replacement converter that restores exhaust flow, clears emission-related \
            fault codes and brings back lost power and fuel economy.\n\n\
            **Perfect For:** Vehicles with a check engine light, failed emissions tests or reduced performance.",
        importance: "Restores engine performance, improves fuel economy, and ensures legal compliance.",
        category: "Exhaust Systems",
        tags: ["exhaust", "emissions", "converter"],
    },
    Seed {
        id: 6,
        name: "CENTRAL DOOR LOCKING SYSTEM",
        price: 3500,
        image: "images/products/IMG-20251230-WA0032.jpg",
        description: "Complete central door locking system with remote control. \
            Lock and unlock all doors simultaneously with the push of a button.",
        full_description: "Complete kit with key fob, actuators and wiring to add one-button central locking \
            to any vehicle.\n\n\
            **Perfect For:** Older vehicles without central locking and anyone replacing a broken system.",
        importance: "Enhances vehicle security and provides modern convenience features.",
        category: "Safety & Security",
        tags: ["locking", "security", "remote"],
    },
];

impl Seed {
    fn to_product(&self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_owned(),
            price: Price::from_units(self.price),
            description: self.description.to_owned(),
            full_description: Some(self.full_description.to_owned()),
            importance: Some(self.importance.to_owned()),
            category: Some(self.category.to_owned()),
            tags: self.tags.iter().map(|tag| (*tag).to_owned()).collect(),
            availability: Availability::InStock,
            featured: false,
            image: Some(self.image.to_owned()),
            images: vec![self.image.to_owned()],
        }
    }
}

/// The fixed default catalog.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    SEEDS.iter().map(Seed::to_product).collect()
}
